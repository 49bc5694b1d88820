pub mod flappy_scene;
pub mod game_common;

use flappy_bee::app::App;
use flappy_bee::persistence::ScoreStore;
use flappy_scene::{render_flappy, SceneInfo};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal the scene can be drawn in.
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 16;

/// Main UI drawing function
pub fn draw<S: ScoreStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.size();

    if area.width < MIN_COLS || area.height < MIN_ROWS {
        let msg = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            area.width, area.height, MIN_COLS, MIN_ROWS
        ))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let snapshot = app.snapshot();
    let info = SceneInfo {
        config: app.config(),
        layout_name: app.layout_name(),
        new_best: app.new_best(),
    };
    render_flappy(frame, area, &snapshot, &info);
}
