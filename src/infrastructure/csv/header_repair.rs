// ============================================================
// HEADER REPAIR
// ============================================================
// Literal fixups for UTF-8 text that was decoded as windows-1252

/// Ordered (corrupted, intended) pairs. Extend by appending.
///
/// No replacement contains any corrupted pattern, so repair is idempotent.
pub const MOJIBAKE_FIXUPS: &[(&str, &str)] = &[
    // U+2103 DEGREE CELSIUS
    ("\u{e2}\u{201e}\u{192}", "°C"),
    ("\u{c3}\u{178}", "ß"),
    ("\u{c2}\u{b0}", "°"),
];

/// Apply every fixup, in order, to every occurrence within `name`
pub fn repair_name(name: &str) -> String {
    MOJIBAKE_FIXUPS
        .iter()
        .fold(name.to_string(), |acc, (corrupted, intended)| {
            acc.replace(corrupted, intended)
        })
}

pub fn repair<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|n| repair_name(n.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repairs_known_artifacts() {
        assert_eq!(repair_name("Temp (â„ƒ)"), "Temp (°C)");
        assert_eq!(repair_name("StraÃŸe"), "Straße");
        assert_eq!(repair_name("Winkel Â°"), "Winkel °");
    }

    #[test]
    fn test_repairs_every_occurrence() {
        assert_eq!(repair_name("â„ƒ/â„ƒ ÃŸÃŸ"), "°C/°C ßß");
    }

    #[test]
    fn test_unknown_corruption_passes_through() {
        assert_eq!(repair_name("GrÃ¶ÃŸe"), "GrÃ¶ße");
        assert_eq!(repair_name("plain"), "plain");
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inputs = [
            "Temp (â„ƒ)",
            "StraÃŸe Â°",
            "Â°Â°C",
            "â„ƒÃŸÂ°",
            "Temp (°C)",
            "",
        ];
        for input in inputs {
            let once = repair_name(input);
            assert_eq!(repair_name(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_repair_keeps_order_and_length() {
        let names = ["a", "Â°", "ÃŸ"];
        assert_eq!(repair(&names), vec!["a", "°", "ß"]);
    }

    #[test]
    fn test_fixups_match_windows_1252_misreads() {
        for intended in ["℃", "ß", "°"] {
            let (misread, _) = encoding_rs::WINDOWS_1252
                .decode_without_bom_handling(intended.as_bytes());
            assert!(
                MOJIBAKE_FIXUPS.iter().any(|(corrupted, _)| *corrupted == misread),
                "no fixup for {intended}"
            );
        }
    }
}
