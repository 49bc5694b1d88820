//! UI rendering for Flappy Bee: the play field, status bar, info panel and
//! the title / game-over modals.

use crate::ui::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar,
};
use flappy_bee::engine::Flyer;
use flappy_bee::{EngineConfig, SessionState, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What occupies one terminal cell of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Sky,
    Flower,
    Stem,
    Ground,
}

/// Below this tilt the bee is drawn flying level.
const LEVEL_TILT_DEGREES: f64 = 10.0;

/// Everything the scene needs besides the snapshot.
pub struct SceneInfo<'a> {
    pub config: &'a EngineConfig,
    pub layout_name: &'a str,
    pub new_best: bool,
}

/// Render the whole game screen.
pub fn render_flappy(frame: &mut Frame, area: Rect, snap: &Snapshot, info: &SceneInfo) {
    let layout = create_game_layout(frame, area, " Flappy Bee ", Color::Yellow, 22);

    render_play_area(frame, layout.content, snap, info.config);
    render_status_bar_content(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap, info);

    match snap.state {
        SessionState::Idle => render_welcome(frame, layout.content),
        SessionState::Over => render_game_over(frame, layout.content, snap, info.new_best),
        SessionState::Running => {}
    }
}

/// Classify the field pixel at the center of a cell.
fn classify(px: f64, py: f64, snap: &Snapshot, config: &EngineConfig) -> Cell {
    let ground_top = config.field_height - config.ground_height;
    if py >= ground_top {
        return Cell::Ground;
    }

    for gate in &snap.gates {
        if px < gate.x || px >= gate.x + config.gate_width {
            continue;
        }
        let bottom_top = config.field_height - gate.bottom_height;
        if py < gate.top_height || py >= bottom_top {
            return Cell::Stem;
        }
        return Cell::Sky;
    }

    Cell::Sky
}

/// Map the field (in pixels) onto the terminal area and draw it.
fn render_play_area(frame: &mut Frame, area: Rect, snap: &Snapshot, config: &EngineConfig) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let x_scale = config.field_width / width as f64;
    let y_scale = config.field_height / height as f64;

    let mut grid = vec![vec![Cell::Sky; width]; height];
    for (row, cells) in grid.iter_mut().enumerate() {
        let py = (row as f64 + 0.5) * y_scale;
        for (col, cell) in cells.iter_mut().enumerate() {
            let px = (col as f64 + 0.5) * x_scale;
            *cell = classify(px, py, snap, config);
        }
    }

    // Blossoms cap each obstacle at the edge of the opening.
    for gate in &snap.gates {
        let top_row = (gate.top_height / y_scale).floor() as i64 - 1;
        let bottom_row = ((config.field_height - gate.bottom_height) / y_scale).floor() as i64;
        let left = (gate.x / x_scale).round() as i64;
        let right = ((gate.x + config.gate_width) / x_scale).round() as i64;
        for row in [top_row, bottom_row] {
            if row < 0 || row as usize >= height {
                continue;
            }
            for col in left.max(0)..right.min(width as i64) {
                let cell = &mut grid[row as usize][col as usize];
                if *cell == Cell::Stem {
                    *cell = Cell::Flower;
                }
            }
        }
    }

    let bee_row = ((snap.flyer_y + config.flyer_size / 2.0) / y_scale).floor();
    let bee_col = ((snap.flyer_x + config.flyer_size / 2.0) / x_scale).floor();
    let bee = if bee_row >= 0.0 && (bee_row as usize) < height && (bee_col as usize) < width {
        Some((bee_row as usize, bee_col as usize))
    } else {
        None
    };
    let bee_glyph = bee_glyph(snap.flyer());

    let mut lines = Vec::with_capacity(height);
    for (row, cells) in grid.iter().enumerate() {
        let mut spans = Vec::with_capacity(width);
        for (col, cell) in cells.iter().enumerate() {
            if bee == Some((row, col)) {
                spans.push(Span::styled(
                    bee_glyph,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }
            let span = match cell {
                Cell::Sky => Span::raw(" "),
                Cell::Stem => Span::styled("█", Style::default().fg(Color::Green)),
                Cell::Flower => Span::styled("✿", Style::default().fg(Color::LightMagenta)),
                Cell::Ground => Span::styled("▒", Style::default().fg(Color::LightGreen)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Bee glyph for the flyer's tilt.
fn bee_glyph(flyer: Flyer) -> &'static str {
    if flyer.tilt_degrees().abs() < LEVEL_TILT_DEGREES {
        "►"
    } else if flyer.rising() {
        "▲"
    } else {
        "▼"
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let controls = [("[Space/Up]", "Fly"), ("[R]", "Restart"), ("[Esc/Q]", "Quit")];
    match snap.state {
        SessionState::Idle => {
            render_status_bar(frame, area, "Press Space to fly!", Color::Yellow, &controls)
        }
        SessionState::Running => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.score),
            Color::Green,
            &controls,
        ),
        SessionState::Over => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", snap.score),
            Color::Red,
            &controls,
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot, info: &SceneInfo) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", info.layout_name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" State: ", label),
            Span::raw(snap.state.name()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                snap.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(snap.best_score.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Gap: ", label),
            Span::styled(
                format!("{:.0}px", info.config.gap),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Flowers: ", label),
            Span::raw(snap.gates.len().to_string()),
        ]),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::raw(format!("{:.1}s", snap.elapsed)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Willkommen bei Flappy Bee!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Drücke SPACE zum Fliegen"),
        Line::from("Hilf der Biene zwischen den"),
        Line::from("Blumen hindurch zu fliegen!"),
    ];
    render_modal(frame, area, Color::Yellow, lines);
}

fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot, new_best: bool) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Spiel beendet!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Score: {}", snap.score)),
        Line::from(format!("Bester Score: {}", snap.best_score)),
    ];
    if new_best {
        lines.push(Line::from(Span::styled(
            "Neuer Highscore!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Space] Nochmal spielen",
        Style::default().fg(Color::DarkGray),
    )));
    render_modal(frame, area, Color::Red, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flappy_bee::Gate;

    fn snapshot_with_gate() -> Snapshot {
        Snapshot {
            state: SessionState::Running,
            flyer_y: 250.0,
            flyer_velocity: 0.0,
            flyer_x: 100.0,
            gates: vec![Gate {
                id: 1,
                x: 200.0,
                top_height: 100.0,
                bottom_height: 200.0,
                passed: false,
            }],
            score: 0,
            best_score: 0,
            ticks: 0,
            elapsed: 0.0,
        }
    }

    #[test]
    fn test_classify_ground_band() {
        let config = EngineConfig::portrait();
        let snap = snapshot_with_gate();
        assert_eq!(classify(10.0, 445.0, &snap, &config), Cell::Ground);
        assert_eq!(classify(10.0, 435.0, &snap, &config), Cell::Sky);
    }

    #[test]
    fn test_classify_gate_obstacles_and_opening() {
        let config = EngineConfig::portrait();
        let snap = snapshot_with_gate();
        // Top obstacle 0..100, opening 100..300, bottom obstacle 300..440
        assert_eq!(classify(210.0, 50.0, &snap, &config), Cell::Stem);
        assert_eq!(classify(210.0, 150.0, &snap, &config), Cell::Sky);
        assert_eq!(classify(210.0, 350.0, &snap, &config), Cell::Stem);
        assert_eq!(classify(260.0, 50.0, &snap, &config), Cell::Sky);
    }

    #[test]
    fn test_bee_glyph_follows_tilt() {
        let glyph = |velocity: f64| bee_glyph(Flyer { y: 250.0, velocity });
        assert_eq!(glyph(0.0), "►");
        // 2 px/tick tilts 8 degrees, still level
        assert_eq!(glyph(2.0), "►");
        assert_eq!(glyph(-2.0), "►");
        assert_eq!(glyph(-8.0), "▲");
        assert_eq!(glyph(5.0), "▼");
    }
}
