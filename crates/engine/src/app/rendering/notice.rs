use super::{Canvas, FrameBuffer, Rgba, TextStyle};

const NOTICE_TEXT_STYLE: TextStyle = TextStyle::scaled(6);
const NOTICE_PANEL_INSET: i32 = 24;
const NOTICE_PANEL_BG_COLOR: Rgba = [10, 12, 16, 255];
const NOTICE_PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];
const NOTICE_TEXT_COLOR: Rgba = [244, 248, 252, 255];

/// Paints `text` on a bordered panel centred in the frame.
pub(crate) fn draw_notice(frame: &mut FrameBuffer, text: &str) {
    let (width, height) = frame.size();
    if width == 0 || height == 0 {
        return;
    }

    let text_width = NOTICE_TEXT_STYLE.text_width(text);
    let text_height = NOTICE_TEXT_STYLE.line_height();
    let panel_width = text_width + NOTICE_PANEL_INSET * 2;
    let panel_height = text_height + NOTICE_PANEL_INSET * 2;
    let panel_left = (width as i32 - panel_width) / 2;
    let panel_top = (height as i32 - panel_height) / 2;

    frame.fill_rect(
        NOTICE_PANEL_BG_COLOR,
        panel_left,
        panel_top,
        panel_width,
        panel_height,
    );
    draw_rect_outline(
        frame,
        panel_left,
        panel_top,
        panel_width,
        panel_height,
        NOTICE_PANEL_BORDER_COLOR,
    );
    frame.draw_text(
        text,
        NOTICE_TEXT_STYLE,
        NOTICE_TEXT_COLOR,
        panel_left + NOTICE_PANEL_INSET,
        panel_top + NOTICE_PANEL_INSET,
    );
}

fn draw_rect_outline(
    canvas: &mut dyn Canvas,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: Rgba,
) {
    if rect_width <= 1 || rect_height <= 1 {
        return;
    }
    canvas.fill_rect(color, x, y, rect_width, 1);
    canvas.fill_rect(color, x, y + rect_height - 1, rect_width, 1);
    canvas.fill_rect(color, x, y, 1, rect_height);
    canvas.fill_rect(color, x + rect_width - 1, y, 1, rect_height);
}
