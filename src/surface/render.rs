//! Surface rendering: header controls, counter, figure and the ranking popup.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::{
    CLOSE_LEADERBOARD, FOCUS_USERNAME, LOGOUT, SCROLL_LEADERBOARD_DOWN, SCROLL_LEADERBOARD_UP,
    SUBMIT_LOGIN, TOGGLE_LEADERBOARD,
};
use super::state::{leaderboard_rows, LeaderboardEntry, LoginForm, SurfaceState};

/// Mouth closed. 7 rows, 17 columns.
const FIGURE_IDLE: [&str; 7] = [
    "   ▄▄▄▄▄▄▄▄▄▄▄   ",
    "  █           █  ",
    "  █  ●     ●  █  ",
    "  █           █  ",
    "  █    ───    █  ",
    "  █           █  ",
    "   ▀▀▀▀▀▀▀▀▀▀▀   ",
];

/// Mouth open, shown while the figure is held down.
const FIGURE_POP: [&str; 7] = [
    "   ▄▄▄▄▄▄▄▄▄▄▄   ",
    "  █           █  ",
    "  █  ▀     ▀  █  ",
    "  █   ▄███▄   █  ",
    "  █   █████   █  ",
    "  █    ▀█▀    █  ",
    "   ▀▀▀▀▀▀▀▀▀▀▀   ",
];

const DIGIT_ROWS: usize = 5;

/// 3x5 block digits.
const DIGIT_FONT: [[&str; DIGIT_ROWS]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

const LEADERBOARD_WIDTH: u16 = 40;
const NAME_WIDTH: usize = 16;

/// Render `n` as five rows of block digits separated by one blank column.
pub fn big_digits(n: u64) -> [String; DIGIT_ROWS] {
    let digits: Vec<usize> = n.to_string().bytes().map(|b| (b - b'0') as usize).collect();
    let mut rows: [String; DIGIT_ROWS] = Default::default();
    for (row, line) in rows.iter_mut().enumerate() {
        let glyphs: Vec<&str> = digits.iter().map(|&d| DIGIT_FONT[d][row]).collect();
        *line = glyphs.join(" ");
    }
    rows
}

pub fn render(
    state: &SurfaceState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let full = state.feature_set.is_full();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if full { 2 } else { 0 }), // header bar
            Constraint::Length(if full { 1 } else { 0 }), // status
            Constraint::Length(2),                         // title
            Constraint::Length(DIGIT_ROWS as u16 + 1),     // counter
            Constraint::Min(FIGURE_IDLE.len() as u16),     // figure
        ])
        .split(area);

    if full {
        render_header(state, f, chunks[0], click_state);
        render_status(state, f, chunks[1]);
    }
    render_title(state, f, chunks[2]);
    render_counter(state, f, chunks[3]);
    render_figure(state, f, chunks[4]);

    // Drawn last so its targets sit on top of the header's.
    if state.interaction.leaderboard_open {
        render_leaderboard(state, f, area, click_state);
    }
}

fn username_field(login: &LoginForm, narrow: bool) -> String {
    let prefix = if narrow { "" } else { "User: " };
    if login.focused {
        format!("{prefix}{}▏", login.username)
    } else if login.username.is_empty() {
        format!("{prefix}(name)")
    } else {
        format!("{prefix}{}", login.username)
    }
}

fn render_header(
    state: &SurfaceState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let busy = state.login.in_flight;

    let ranking_style = if state.interaction.leaderboard_open {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };
    let button_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let mut bar = TabBar::new("│").tab(
        if narrow { "★ Top" } else { "★ Ranking" },
        ranking_style,
        TOGGLE_LEADERBOARD,
    );

    bar = if state.is_authenticated() {
        bar.tab(if busy { "…" } else { "Logout" }, button_style, LOGOUT)
    } else {
        let field_style = if state.login.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        bar.tab(username_field(&state.login, narrow), field_style, FOCUS_USERNAME)
            .tab(if busy { "…" } else { "Login" }, button_style, SUBMIT_LOGIN)
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

fn status_line(state: &SurfaceState) -> Option<Line<'static>> {
    if let Some(err) = &state.login.error {
        return Some(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(session) = &state.session {
        return Some(Line::from(vec![
            Span::styled("Logged in as ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.username.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    None
}

fn render_status(state: &SurfaceState, f: &mut Frame, area: Rect) {
    if let Some(line) = status_line(state) {
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

fn render_title(state: &SurfaceState, f: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        format!("POP {}", state.app_id.to_uppercase()),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn render_counter(state: &SurfaceState, f: &mut Frame, area: Rect) {
    let animating = state.is_animating();
    let style = if animating {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let rows = big_digits(state.click_count);
    let width = rows[0].chars().count() as u16;

    // Too wide for block digits: plain number.
    if width + 1 > area.width {
        let line = Line::from(Span::styled(state.click_count.to_string(), style));
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        return;
    }

    // The bump: one column to the right while animating.
    let pad = ((area.width - width) / 2 + animating as u16) as usize;
    let lines: Vec<Line> = rows
        .iter()
        .map(|r| Line::from(Span::styled(format!("{}{}", " ".repeat(pad), r), style)))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_figure(state: &SurfaceState, f: &mut Frame, area: Rect) {
    let (art, color) = if state.is_pressed() {
        (&FIGURE_POP, Color::LightMagenta)
    } else {
        (&FIGURE_IDLE, Color::Magenta)
    };

    let top = area.height.saturating_sub(art.len() as u16) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.extend(
        art.iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(color)))),
    );
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        name.to_string()
    } else {
        let mut s: String = name.chars().take(NAME_WIDTH - 1).collect();
        s.push('…');
        s
    }
}

fn leaderboard_line(rank: usize, entry: &LeaderboardEntry, is_me: bool) -> Line<'static> {
    let name_style = if is_me {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!(" {:>2}. ", rank), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<width$}", truncate_name(&entry.display_name), width = NAME_WIDTH),
            name_style,
        ),
        Span::styled(
            format!(" {} clicks", entry.click_count),
            Style::default().fg(Color::Cyan),
        ),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// ▲/▼ row, dimmed once there is nothing more in that direction.
fn scroll_line(text: &str, more: bool) -> Line<'static> {
    let style = if more {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(text.to_string(), style))
}

fn render_leaderboard(
    state: &SurfaceState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let me = state.session.as_ref().map(|s| s.username.as_str());

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(
            " [Esc] Close",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        CLOSE_LEADERBOARD,
    );

    let total = state.leaderboard.len();
    let rows = leaderboard_rows(area.height);
    if total > rows {
        // Too long for the screen: a window of `rows` entries between ▲ and ▼.
        let first = state.interaction.leaderboard_scroll.min(total - rows);
        let last = first + rows;
        cl.push_clickable(scroll_line(" ▲ more", first > 0), SCROLL_LEADERBOARD_UP);
        for (i, entry) in state.leaderboard.iter().enumerate().skip(first).take(rows) {
            cl.push(leaderboard_line(i + 1, entry, me == Some(entry.display_name.as_str())));
        }
        cl.push_clickable(
            scroll_line(&format!(" ▼ {}-{} of {total}", first + 1, last), last < total),
            SCROLL_LEADERBOARD_DOWN,
        );
    } else {
        cl.push(Line::from(""));
        if total == 0 {
            cl.push(Line::from(Span::styled(
                " No scores yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, entry) in state.leaderboard.iter().enumerate() {
            cl.push(leaderboard_line(i + 1, entry, me == Some(entry.display_name.as_str())));
        }
    }

    let rect = centered(area, LEADERBOARD_WIDTH, cl.len() as u16 + 2);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" ★ Ranking ");

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(rect, &mut cs, 1, 1);
    }
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), rect);
}
