/// Greedy word wrap of `text` at `width` columns.
///
/// A line breaks at the last space that fits and that space is consumed.
/// Words longer than `width` are split. Every other character is kept, so
/// the cursor can be placed at the end of the last line. Empty text yields
/// a single empty line; a zero width yields no lines.
pub(super) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;

    while chars.len() - start > width {
        let limit = start + width;
        match (start + 1..=limit).rev().find(|&i| chars[i] == ' ') {
            Some(space) => {
                lines.push(chars[start..space].iter().collect());
                start = space + 1;
            }
            None => {
                lines.push(chars[start..limit].iter().collect());
                start = limit;
            }
        }
    }

    lines.push(chars[start..].iter().collect());
    lines
}

/// Row and column just past the end of the wrapped text.
///
/// A full last line puts the cursor at the start of the following row.
pub(super) fn cursor_position(lines: &[String], width: usize) -> (usize, usize) {
    let row = lines.len().saturating_sub(1);
    let col = lines.last().map_or(0, |line| line.chars().count());
    if width > 0 && col >= width {
        (row + 1, 0)
    } else {
        (row, col)
    }
}
