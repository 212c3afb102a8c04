//! Turns a [`View`] into ratatui widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Tabs, Wrap},
};

use super::data::{BannerView, BoxView, OverlayView, SliderContent, SliderView, View};

const NO_IMAGE: &str = "(no image)";
const HELP: &str = "Tab screens  ←→↑↓ move  Enter open  Esc close  / search  r reload  q quit";

pub fn draw(frame: &mut Frame, view: &View) {
    let [header, banner, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, view);
    draw_banner(frame, banner, view.banner.as_ref(), view.banner_focused);

    let rows = Layout::vertical(view.sliders.iter().map(|_| Constraint::Length(5))).split(body);
    for (slider, area) in view.sliders.iter().zip(rows.iter()) {
        draw_slider(frame, *area, slider);
    }

    let footer_text = match &view.search_input {
        Some(input) => Line::from(vec![
            Span::from("Search: ").bold(),
            Span::from(input.as_str()),
            Span::from("_").slow_blink(),
        ]),
        None => Line::from(HELP).dark_gray(),
    };
    frame.render_widget(Paragraph::new(footer_text), footer);

    if let Some(overlay) = &view.overlay {
        draw_overlay(frame, frame.area(), overlay);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &View) {
    let tabs = Tabs::new(view.tabs.iter().copied())
        .select(view.active_tab)
        .highlight_style(Style::new().yellow().bold())
        .block(
            Block::bordered()
                .title(" cinedeck ")
                .title_bottom(Line::from(format!(" {} ", view.route)).right_aligned()),
        );
    frame.render_widget(tabs, area);
}

fn image_line(image: &str) -> Line<'_> {
    if image.is_empty() {
        Line::from(NO_IMAGE).dark_gray()
    } else {
        Line::from(image).blue().underlined()
    }
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: Option<&BannerView>, focused: bool) {
    let mut block = Block::bordered();
    if focused {
        block = block.border_style(Style::new().yellow());
    }
    let text = match banner {
        Some(banner) => Text::from(vec![
            Line::from(banner.title.as_str()).bold(),
            Line::from(banner.overview.as_str()),
            image_line(&banner.image),
        ]),
        None => Text::from("Loading..."),
    };
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_slider(frame: &mut Frame, area: Rect, slider: &SliderView) {
    let title = format!(
        " {} ({}/{}) ",
        slider.heading,
        slider.page_index + 1,
        slider.page_count.max(1)
    );
    let mut block = Block::bordered().title(title);
    if slider.focused.is_some() {
        block = block.border_style(Style::new().yellow());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &slider.content {
        SliderContent::Loading => {
            frame.render_widget(Paragraph::new("Loading...").dark_gray(), inner);
        }
        SliderContent::Failed(reason) => {
            frame.render_widget(
                Paragraph::new(format!("Could not load: {}", reason))
                    .red()
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        SliderContent::Boxes(boxes) if boxes.is_empty() => {
            frame.render_widget(Paragraph::new("Nothing here").dark_gray(), inner);
        }
        SliderContent::Boxes(boxes) => {
            let count = u32::try_from(slider.window_size.max(1)).unwrap_or(u32::MAX);
            let cells = Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count)))
                .spacing(1)
                .split(inner);
            for (index, (item, cell)) in boxes.iter().zip(cells.iter()).enumerate() {
                draw_box(frame, *cell, item, slider.focused == Some(index));
            }
        }
    }
}

fn draw_box(frame: &mut Frame, area: Rect, item: &BoxView, focused: bool) {
    let mut title = Line::from(item.title.as_str()).bold();
    if focused {
        title = title.black().on_yellow();
    }
    let image = if item.image.is_empty() {
        Line::from(NO_IMAGE).dark_gray()
    } else {
        Line::from("[image]").blue()
    };
    frame.render_widget(
        Paragraph::new(Text::from(vec![title, image])).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_overlay(frame: &mut Frame, area: Rect, overlay: &OverlayView) {
    let [popup] = Layout::vertical([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(popup);

    let mut lines = vec![
        Line::from(overlay.title.as_str()).bold(),
        Line::from(overlay.tagline.as_str()).italic(),
        Line::default(),
    ];
    let fields = [
        ("Genres", &overlay.genres),
        ("Runtime", &overlay.runtime),
        ("Released", &overlay.release_date),
    ];
    for (label, value) in fields {
        lines.push(Line::from(vec![
            Span::from(format!("{}: ", label)).bold(),
            Span::from(value.as_str()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(overlay.overview.as_str()));
    lines.push(Line::default());
    lines.push(image_line(&overlay.image));
    if let Some(note) = &overlay.note {
        lines.push(Line::from(note.as_str()).dark_gray().italic());
    }

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Details ").title_bottom(" Esc to close ")),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(view: &View) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn view() -> View {
        View {
            tabs: vec!["Movies", "TV", "Search"],
            active_tab: 0,
            route: "/".to_string(),
            banner: Some(BannerView {
                title: "Dune".to_string(),
                overview: "Spice.".to_string(),
                image: String::new(),
            }),
            banner_focused: true,
            sliders: vec![
                SliderView {
                    heading: "Now Playing".to_string(),
                    content: SliderContent::Boxes(vec![BoxView {
                        title: "Alien".to_string(),
                        image: "https://image.tmdb.org/t/p/w500/a.jpg".to_string(),
                    }]),
                    page_index: 0,
                    page_count: 2,
                    window_size: 5,
                    focused: None,
                },
                SliderView {
                    heading: "Top Rated".to_string(),
                    content: SliderContent::Failed("offline".to_string()),
                    page_index: 0,
                    page_count: 1,
                    window_size: 5,
                    focused: None,
                },
                SliderView {
                    heading: "Upcoming".to_string(),
                    content: SliderContent::Loading,
                    page_index: 0,
                    page_count: 1,
                    window_size: 5,
                    focused: None,
                },
            ],
            overlay: None,
            search_input: None,
        }
    }

    #[test]
    fn test_draws_screen() {
        let screen = render(&view());

        assert!(screen.contains("Dune"));
        assert!(screen.contains(NO_IMAGE));
        assert!(screen.contains("Now Playing (1/2)"));
        assert!(screen.contains("Alien"));
        assert!(screen.contains("Could not load: offline"));
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_draws_overlay_shell() {
        let mut view = view();
        view.overlay = Some(OverlayView {
            note: Some("Loading details...".to_string()),
            ..Default::default()
        });
        let screen = render(&view);

        assert!(screen.contains("Details"));
        assert!(screen.contains("Runtime:"));
        assert!(screen.contains("Loading details..."));
    }

    #[test]
    fn test_draws_search_input() {
        let mut view = view();
        view.search_input = Some("blade".to_string());
        let screen = render(&view);

        assert!(screen.contains("Search: blade"));
    }
}
