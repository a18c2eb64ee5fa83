use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let inner = vertical[1];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(inner.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(inner);
    horizontal[1]
}

/// Horizontally centred strip `height` rows tall, one row above the bottom edge.
pub fn bottom_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centred() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = popup_rect(area, 20, 10);
        assert_eq!(rect, Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn bottom_strip_is_clamped() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = bottom_rect(area, 80, 4);
        assert_eq!(rect, Rect::new(0, 5, 30, 4));
    }
}
