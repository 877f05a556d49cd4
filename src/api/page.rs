//! HTML rendering of the stopwatch widget

use std::fmt::Write;

use super::view::{Control, StopwatchView};

const STYLE: &str = "body{font-family:sans-serif;text-align:center}\
.stopwatch-timer{font-size:4em;margin:0.5em 0}\
.stopwatch-lap{margin:0.25em 0}\
form{display:inline}";

/// Render the whole page for a view.
///
/// A running stopwatch asks the browser to reload every second so the
/// display follows the ticks.
pub fn render_page(view: &StopwatchView) -> String {
    let mut html = String::with_capacity(1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if view.is_running() {
        html.push_str("<meta http-equiv=\"refresh\" content=\"1\">\n");
    }
    let _ = write!(html, "<title>{}</title>\n<style>{}</style>\n", view.display, STYLE);
    html.push_str("</head>\n<body>\n");
    render_widget(&mut html, view);
    html.push_str("</body>\n</html>\n");

    html
}

fn render_widget(html: &mut String, view: &StopwatchView) {
    html.push_str("<div class=\"stopwatch\">\n");
    let _ = writeln!(html, "<h1 class=\"stopwatch-timer\">{}</h1>", view.display);

    render_button(html, view.primary);
    if let Some(control) = view.secondary {
        render_button(html, control);
    }

    if view.shows_laps() {
        html.push_str("<div class=\"stopwatch-laps\">\n");
        for lap in &view.laps {
            let _ = writeln!(
                html,
                "<div class=\"stopwatch-lap\"><strong>{}</strong>/ {} \
                 <form method=\"post\" action=\"/laps/{}/delete\"><button type=\"submit\"> X </button></form></div>",
                lap.position, lap.display, lap.index
            );
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
}

fn render_button(html: &mut String, control: Control) {
    let class = match control {
        Control::Start => " class=\"start-btn\"",
        Control::Stop => " class=\"stop-btn\"",
        Control::Reset | Control::Lap => "",
    };
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"{}\"><button type=\"submit\"{}>{}</button></form>",
        control.form_action(),
        class,
        control.label()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stopwatch;

    #[test]
    fn test_idle_page() {
        let html = render_page(&StopwatchView::from(&Stopwatch::default()));
        assert!(html.contains("<h1 class=\"stopwatch-timer\">0:00</h1>"));
        assert!(html.contains("action=\"/start\""));
        assert!(!html.contains("action=\"/reset\""));
        assert!(!html.contains("action=\"/lap\""));
        assert!(!html.contains("stopwatch-laps"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_running_page_with_laps() {
        let mut sw = Stopwatch::new(5);
        sw.start();
        sw.lap();
        let html = render_page(&StopwatchView::from(&sw));

        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("action=\"/stop\""));
        assert!(html.contains("action=\"/lap\""));
        assert!(!html.contains("action=\"/start\""));
        assert!(html.contains("<strong>1</strong>/ 0:05"));
        assert!(html.contains("action=\"/laps/0/delete\""));
    }

    #[test]
    fn test_stopped_page() {
        let mut sw = Stopwatch::default();
        sw.start();
        sw.stop();
        let html = render_page(&StopwatchView::from(&sw));
        assert!(html.contains("action=\"/start\""));
        assert!(html.contains("action=\"/reset\""));
    }
}
