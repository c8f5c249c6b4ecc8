use super::RawEntry;

/// Catalog number from columns 3-7 of line 1, if they hold a plain integer.
pub fn extract_catalog_number(line1: &str) -> Option<u32> {
    line1.get(2..7)?.trim().parse().ok()
}

/// Parse concatenated TLE text. Accepts three-line blocks (name first) and
/// bare two-line blocks; anything else is skipped.
pub fn parse_tle_text(content: &str) -> Vec<RawEntry> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            let name = match extract_catalog_number(lines[i]) {
                Some(id) => format!("NORAD {}", id),
                None => format!("NORAD {}", lines[i].get(2..7).unwrap_or("?").trim()),
            };
            result.push(RawEntry {
                name,
                line1: lines[i].to_string(),
                line2: lines[i + 1].to_string(),
            });
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE, name optionally prefixed "0 "
            let name = lines[i].strip_prefix("0 ").unwrap_or(lines[i]).trim();
            result.push(RawEntry {
                name: name.to_string(),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
            });
            i += 3;
        } else {
            log::trace!("Skipping unrecognised TLE line: {}", lines[i]);
            i += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn catalog_number_from_columns() {
        assert_eq!(extract_catalog_number(ISS_LINE1), Some(25544));
        assert_eq!(extract_catalog_number("1 A0001U 24001A"), None);
        assert_eq!(extract_catalog_number("1 12"), None);
        assert_eq!(extract_catalog_number(""), None);
    }

    #[test]
    fn parses_mixed_two_and_three_line_blocks() {
        let text = format!(
            "{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n\n{POLAR_LINE1}\r\n{POLAR_LINE2}\r\n0 {GEO_NAME}\n{GEO_LINE1}\n{GEO_LINE2}\n"
        );
        let entries = parse_tle_text(&text);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], entry(ISS_NAME, ISS_LINE1, ISS_LINE2));
        assert_eq!(entries[1].name, "NORAD 40001");
        assert_eq!(entries[2].name, GEO_NAME);
    }

    #[test]
    fn skips_stray_lines() {
        let text = format!("garbage\nmore garbage\n{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\ntrailing");
        let entries = parse_tle_text(&text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, ISS_NAME);
    }
}
