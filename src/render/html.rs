//! Static markup for a [`PageView`].

use super::{PageView, PaneContent, PaneView};
use std::fmt::Write;

const IFRAME_ALLOW: &str = "autoplay; encrypted-media; picture-in-picture";

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page document.
pub fn render_page(view: &PageView, title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    html.push_str("</head>\n<body>\n");
    html.push_str(&render_layout(view));
    html.push_str("</body>\n</html>\n");
    html
}

/// The layout container and its panes.
pub fn render_layout(view: &PageView) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<div id=\"app\" class=\"{}\" data-mode=\"{}\" data-focus=\"{}\">",
        escape(&view.layout_classes()),
        view.mode.as_str(),
        view.focus
    );
    for pane in &view.panes {
        render_pane(&mut html, pane);
    }
    html.push_str("</div>\n");
    html
}

fn render_pane(html: &mut String, pane: &PaneView) {
    let _ = writeln!(
        html,
        "  <div class=\"{}\" data-slot=\"{}\">",
        escape(&pane.classes()),
        pane.slot
    );
    if let Some(badge) = &pane.badge {
        let _ = writeln!(html, "    <div class=\"badge\">{}</div>", escape(badge));
    }
    match &pane.content {
        PaneContent::Player {
            provider,
            container_id,
            src,
        } => {
            let _ = writeln!(
                html,
                "    <iframe id=\"{}\" class=\"embed embed-{}\" src=\"{}\" allow=\"{}\" allowfullscreen></iframe>",
                escape(container_id),
                provider,
                escape(src),
                IFRAME_ALLOW
            );
        }
        PaneContent::Frame { container_id, src } => {
            let _ = writeln!(
                html,
                "    <iframe id=\"{}\" class=\"embed\" src=\"{}\" allow=\"{}\" allowfullscreen></iframe>",
                escape(container_id),
                escape(src),
                IFRAME_ALLOW
            );
        }
        PaneContent::Placeholder { text } => {
            let _ = writeln!(html, "    <div class=\"placeholder\">{}</div>", escape(text));
        }
    }
    html.push_str("  </div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SlotId;
    use spectate_config::{LayoutFamily, LayoutMode};

    fn view(content: PaneContent, badge: &str) -> PageView {
        PageView {
            family: LayoutFamily::Duo,
            mode: LayoutMode::Both,
            focus: 0,
            audio: Some(SlotId::LEFT),
            cycle_enabled: false,
            panes: vec![PaneView {
                slot: SlotId::LEFT,
                stream: Some(0),
                badge: Some(badge.to_string()),
                focused: true,
                audio_active: true,
                ready: true,
                content,
            }],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_layout_markup() {
        let html = render_layout(&view(
            PaneContent::Frame {
                container_id: "url-tile0-1".to_string(),
                src: "https://x.example/p?a=1&b=\"2\"".to_string(),
            },
            "x.example",
        ));
        assert!(html.starts_with("<div id=\"app\" class=\"duo layout-both\""));
        assert!(html.contains("class=\"frame tile0 focused audio-active\""));
        assert!(html.contains("<div class=\"badge\">x.example</div>"));
        assert!(html.contains("src=\"https://x.example/p?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_badge_is_escaped() {
        let html = render_page(
            &view(PaneContent::Placeholder { text: "No channel" }, "<script>"),
            "spectate",
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<title>spectate</title>"));
        assert!(html.contains("<div class=\"placeholder\">No channel</div>"));
    }
}
