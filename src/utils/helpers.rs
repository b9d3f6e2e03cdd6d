use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spreadsheet column letters for a 0-based column index (0 -> A, 26 -> AA).
#[must_use]
pub fn index_to_col_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index + 1;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    col_name
}

// Format a 0-based (row, col) position as an A1 reference
#[must_use]
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col_name(col), row + 1)
}

/// Terminal cells taken by `text`; accented letters are one cell, CJK two.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to fit `width` display cells, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let mut result = String::with_capacity(width);
    let mut current_width = 0;

    for c in text.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + char_width < width {
            result.push(c);
            current_width += char_width;
        } else {
            break;
        }
    }

    result.push('…');
    result
}
