/// Splits one CSV line into its fields.
///
/// A double quote toggles quoted mode and is dropped; commas inside quotes
/// stay part of the field. Escaped quotes (`""`) are not supported, and an
/// unterminated quote simply runs to the end of the line.
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Data lines of a CSV document: header dropped, blank lines skipped.
pub fn data_rows(csv_text: &str) -> impl Iterator<Item = &str> {
    csv_text
        .split('\n')
        .skip(1)
        .filter(|row| !row.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(parse_csv_row("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_commas_inside_quotes() {
        assert_eq!(parse_csv_row("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn empty_line_is_one_empty_field() {
        assert_eq!(parse_csv_row(""), vec![""]);
    }

    #[test]
    fn unterminated_quote_keeps_everything_seen() {
        assert_eq!(parse_csv_row("a,\"b,c"), vec!["a", "b,c"]);
    }

    #[test]
    fn trailing_comma_yields_empty_last_field() {
        assert_eq!(parse_csv_row("x,"), vec!["x", ""]);
    }

    #[test]
    fn header_and_blank_lines_are_skipped() {
        let text = "url,alt\nhttps://a.png,A\n\n   \r\nhttps://b.png,B\n";
        let rows: Vec<&str> = data_rows(text).collect();
        assert_eq!(rows, vec!["https://a.png,A", "https://b.png,B"]);
    }
}
