use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Widget, Wrap,
    },
};

use crate::{
    asset::{IconImage, ICON_SAMPLES},
    placer::{BAND_DEPTH, GRID_EXTENT},
    runtime::USAGE_HINT,
    session::Session,
    trial::IconBox,
};

const HORIZONTAL_MARGIN: u16 = 2;
const STATUS_HEIGHT: u16 = 5;
const RED_DOT_RADIUS: f64 = 0.12;
const GRID_COLOR: Color = Color::DarkGray;

/// Everything one frame needs: the session plus the decoded icon.
pub struct SessionView<'a, R: Rng> {
    pub session: &'a Session<R>,
    pub icon: &'a IconImage,
}

impl<'a, R: Rng> SessionView<'a, R> {
    pub fn new(session: &'a Session<R>, icon: &'a IconImage) -> Self {
        Self { session, icon }
    }
}

impl<R: Rng> Widget for &SessionView<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .split(area);

        let session = self.session;
        let trial = session.pending();
        let lo = -BAND_DEPTH;
        let hi = GRID_EXTENT + BAND_DEPTH;

        Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([lo, hi])
            .y_bounds([lo, hi])
            .paint(|ctx| {
                draw_grid(ctx);
                ctx.layer();
                if let Some(trial) = trial {
                    draw_icon(ctx, self.icon, &trial.icon);
                    ctx.layer();
                    ctx.draw(&Circle {
                        x: trial.red_dot.x,
                        y: trial.red_dot.y,
                        radius: RED_DOT_RADIUS,
                        color: Color::Red,
                    });
                }
            })
            .render(chunks[0], buf);

        status_panel(session).render(chunks[1], buf);
    }
}

fn draw_grid(ctx: &mut Context) {
    let extent = GRID_EXTENT as i32;
    for i in 0..=extent {
        let v = i as f64;
        ctx.draw(&CanvasLine::new(v, 0.0, v, GRID_EXTENT, GRID_COLOR));
        ctx.draw(&CanvasLine::new(0.0, v, GRID_EXTENT, v, GRID_COLOR));
    }
}

/// Paints the icon samples across `icon_box`, picture top at the box top.
fn draw_icon(ctx: &mut Context, icon: &IconImage, icon_box: &IconBox) {
    let step_x = icon_box.width() / ICON_SAMPLES as f64;
    let step_y = icon_box.height() / ICON_SAMPLES as f64;
    for row in 0..ICON_SAMPLES {
        for col in 0..ICON_SAMPLES {
            let [r, g, b] = icon.sample(col, row);
            let x = icon_box.left + (col as f64 + 0.5) * step_x;
            let y = icon_box.top - (row as f64 + 0.5) * step_y;
            ctx.draw(&Points {
                coords: &[(x, y)],
                color: Color::Rgb(r, g, b),
            });
        }
    }
}

fn status_panel<R: Rng>(session: &Session<R>) -> Paragraph<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let status_style = if session.status() == USAGE_HINT {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let shown = (session.frame() + 1).min(session.total());
    let description = session
        .pending()
        .map(|t| t.describe())
        .unwrap_or_default();

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("frame {} / {}", shown, session.total()), bold),
            Span::raw("  "),
            Span::raw(description),
        ]),
        Line::from(Span::styled(session.status().to_string(), status_style)),
        Line::from(Span::styled(
            "(k) こ  (t) そ  (a) あ  (enter) redraw  (q) quit",
            dim,
        )),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}
