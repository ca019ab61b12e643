use swatchbook_application::IndexReport;
use swatchbook_domain::{ColorHex, ExtractedColor, ImageEntry, SwatchState, UploadPhase};

pub fn present_entry_row(index: usize, entry: &ImageEntry) -> String {
    match &entry.colors {
        Some(colors) => format!(
            "{}\t{}\t{}\t{}\t{}",
            index, colors.primary, colors.secondary, colors.tertiary, entry.url
        ),
        None => format!("{}\t-\t-\t-\t{}", index, entry.url),
    }
}

pub fn present_chips(chips: &[ColorHex], selected: Option<&ColorHex>) -> String {
    let mut parts = vec![if selected.is_none() {
        "[All]".to_string()
    } else {
        "All".to_string()
    }];
    parts.extend(chips.iter().map(|chip| {
        if selected.is_some_and(|color| color.matches(chip)) {
            format!("[{chip}]")
        } else {
            chip.to_string()
        }
    }));
    parts.join(" ")
}

pub fn present_extracted_color(color: &ExtractedColor) -> String {
    format!(
        "{}\trgb({}, {}, {})\thue={:.3} sat={:.3} light={:.3} intensity={:.3}\tarea={:.3}",
        color.hex,
        color.red,
        color.green,
        color.blue,
        color.hue,
        color.saturation,
        color.lightness,
        color.intensity,
        color.area
    )
}

pub fn present_swatch_state(state: &SwatchState) -> String {
    match state {
        SwatchState::Idle => "idle".to_string(),
        SwatchState::Hovered { index, color } => format!("card {index}: {color}"),
        SwatchState::Copied { index, .. } => format!("card {index}: Copied"),
    }
}

pub fn present_upload_phase(phase: UploadPhase, colors: &[ExtractedColor]) -> String {
    match phase {
        UploadPhase::Idle => "idle: drop an image or pick a file".to_string(),
        UploadPhase::Processing => "processing...".to_string(),
        UploadPhase::Ready => format!("ready: {} colors", colors.len()),
        UploadPhase::Failed => "no palette".to_string(),
    }
}

pub fn present_index_report(report: &IndexReport) -> String {
    format!(
        "index finished: scanned={}, supported={}, indexed={}, without_colors={}, failed={}",
        report.scanned_files,
        report.supported_files,
        report.indexed,
        report.without_colors,
        report.failed
    )
}

#[cfg(test)]
mod tests {
    use swatchbook_domain::SwatchColors;

    use super::*;

    #[test]
    fn entry_rows_show_dashes_without_colors() {
        let entry = ImageEntry {
            url: "b.png".to_string(),
            colors: None,
        };
        assert_eq!(present_entry_row(1, &entry), "1\t-\t-\t-\tb.png");

        let entry = ImageEntry {
            url: "a.png".to_string(),
            colors: Some(SwatchColors {
                primary: ColorHex::new("#ff0000"),
                secondary: ColorHex::new("#00ff00"),
                tertiary: ColorHex::new("#0000ff"),
            }),
        };
        assert_eq!(
            present_entry_row(0, &entry),
            "0\t#ff0000\t#00ff00\t#0000ff\ta.png"
        );
    }

    #[test]
    fn chips_mark_the_selection() {
        let chips = vec![ColorHex::new("#ff0000"), ColorHex::new("#00ff00")];
        assert_eq!(present_chips(&chips, None), "[All] #ff0000 #00ff00");
        assert_eq!(
            present_chips(&chips, Some(&ColorHex::new("#00FF00"))),
            "All #ff0000 [#00ff00]"
        );
    }
}
