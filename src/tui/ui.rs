use std::collections::VecDeque;

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;
use strum::IntoEnumIterator;

use resmap::config::{WeightAxis, WEIGHT_MAX};
use resmap::geo::normalize_region_key;
use resmap::score::Tier;
use resmap::sync::SessionState;

pub struct UiState {
    pub selected_axis: usize,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_axis: 0,
            logs: VecDeque::new(),
            max_logs: 8,
        }
    }
}

impl UiState {
    pub fn select_axis(&mut self, axis: usize) {
        if axis < WeightAxis::iter().count() {
            self.selected_axis = axis;
        }
    }

    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Good => Color::Green,
        Tier::Moderate => Color::Yellow,
        Tier::Poor => Color::Red,
    }
}

pub fn draw_ui(frame: &mut Frame, state: &SessionState, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Length(7),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(8)])
        .split(body[0]);
    draw_sliders(frame, left[0], state, ui);
    draw_selection(frame, left[1], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(38),
            Constraint::Percentage(34),
            Constraint::Percentage(28),
        ])
        .split(body[1]);
    draw_chart(frame, right[0], state);
    draw_map(frame, right[1], state);
    draw_table(frame, right[2], state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_commands(frame, bottom[0]);
    draw_logs(frame, bottom[1], ui);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("ResMap Dashboard");
    let total = state.weights.total();
    let balance = if state.weights.is_balanced() {
        Span::styled(
            format!("weights total {}", total),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!("weights total {} (expected 100)", total),
            Style::default().fg(Color::Red),
        )
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{} regions", state.store.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        balance,
        Span::raw(" | q to exit"),
    ]);
    let text = Paragraph::new(line).wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        text,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_sliders(frame: &mut Frame, area: Rect, state: &SessionState, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Weights");
    frame.render_widget(block, area);
    let inner = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 4])
        .split(inner);

    for (i, axis) in WeightAxis::iter().enumerate() {
        let value = state.weights.get(axis);
        let selected = i == ui.selected_axis;
        let border_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let gauge_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("[{}] {}", i + 1, axis))
                    .border_style(border_style),
            )
            .gauge_style(gauge_style)
            .percent(value.min(WEIGHT_MAX) as u16)
            .label(format!("{}%", value));
        frame.render_widget(gauge, rows[i]);
    }
}

fn draw_selection(frame: &mut Frame, area: Rect, state: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Region Detail");
    let lines = match state.selection() {
        Some(sel) => vec![
            Line::from(vec![
                Span::styled(sel.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(sel.tier.to_string(), Style::default().fg(tier_color(sel.tier))),
            ]),
            Line::from(format!(
                "score {:.3}   rank #{} of {}",
                sel.score,
                sel.rank,
                state.table.len()
            )),
            Line::raw(""),
            Line::from(format!("income      {:+.3}", sel.breakdown.income_term)),
            Line::from(format!("employment  {:+.3}", sel.breakdown.unemployment_term)),
            Line::from(format!("cost        {:+.3}", sel.breakdown.cost_term)),
            Line::from(format!("disaster    {:+.3}", sel.breakdown.disaster_term)),
            Line::from(format!("penalty     x{:.2}", sel.breakdown.penalty_factor)),
        ],
        None => vec![Line::raw("no region selected")],
    };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn short_label(name: &str) -> String {
    name.chars().take(4).collect()
}

fn draw_chart(frame: &mut Frame, area: Rect, state: &SessionState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Resilience Scores (ranked)");

    let bar_width: u16 = 5;
    let bar_gap: u16 = 1;
    let capacity = (area.width.saturating_sub(2) / (bar_width + bar_gap)).max(1) as usize;

    let bars: Vec<Bar> = state
        .chart
        .iter()
        .take(capacity)
        .map(|bar| {
            Bar::default()
                .value((bar.score * 1000.0).round() as u64)
                .text_value(format!("{:.3}", bar.score))
                .label(Line::from(short_label(&bar.name)))
                .style(Style::default().fg(tier_color(bar.tier)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(1000)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn ring_centroid(rings: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let ring = rings.first()?;
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
    Some((sx / n, sy / n))
}

fn draw_map(frame: &mut Frame, area: Rect, state: &SessionState) {
    let block = Block::default().borders(Borders::ALL).title("Choropleth");

    let Some(layer) = &state.boundaries else {
        let paragraph = Paragraph::new("boundary data unavailable")
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(block, area);
        frame.render_widget(
            paragraph,
            area.inner(&Margin {
                vertical: 1,
                horizontal: 1,
            }),
        );
        return;
    };

    let selected_key = state
        .selected_region()
        .map(|r| normalize_region_key(&r.name));

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([layer.bounds.min_x, layer.bounds.max_x])
        .y_bounds([layer.bounds.min_y, layer.bounds.max_y])
        .paint(|ctx| {
            for feature in &layer.features {
                // Unmatched features keep the neutral default style.
                let color = match feature.score {
                    Some(_) => tier_color(feature.tier),
                    None => Color::DarkGray,
                };
                for ring in &feature.rings {
                    for pair in ring.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: pair[0].0,
                            y1: pair[0].1,
                            x2: pair[1].0,
                            y2: pair[1].1,
                            color,
                        });
                    }
                }
            }

            if let Some(key) = &selected_key {
                if let Some(feature) = layer.features.iter().find(|f| &f.key == key) {
                    if let Some((cx, cy)) = ring_centroid(&feature.rings) {
                        ctx.print(
                            cx,
                            cy,
                            Line::styled(
                                feature.label.clone(),
                                Style::default()
                                    .fg(Color::White)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        );
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_table(frame: &mut Frame, area: Rect, state: &SessionState) {
    let header = Row::new(vec!["Rank", "Region", "Pop", "Score", "Tier"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .table
        .iter()
        .map(|e| {
            let pop = match e.population {
                Some(p) => p.to_string(),
                None => "-".to_string(),
            };
            Row::new(vec![
                Cell::from(e.rank.to_string()),
                Cell::from(e.name.clone()),
                Cell::from(pop),
                Cell::from(format!("{:.3}", e.score)),
                Cell::from(e.tier.to_string()),
            ])
            .style(Style::default().fg(tier_color(e.tier)))
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ranked Regions"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default();
    table_state.select(state.selection().map(|s| s.rank.saturating_sub(1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn draw_commands(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("1-4", Style::default().fg(Color::Yellow)),
            Span::raw("    select weight slider"),
        ]),
        Line::from(vec![
            Span::styled("=/-", Style::default().fg(Color::Yellow)),
            Span::raw("    adjust weight by 5"),
        ]),
        Line::from(vec![
            Span::styled("0", Style::default().fg(Color::Yellow)),
            Span::raw("      reset weights to defaults"),
        ]),
        Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw("    walk the region roster"),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw("      exit dashboard"),
        ]),
    ];
    let block = Block::default().borders(Borders::ALL).title("Commands");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_logs(frame: &mut Frame, area: Rect, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = ui
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}
