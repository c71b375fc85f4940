//! Small HTML building helpers
//!
//! Every value that comes from the database or the request goes through
//! [`escape`] before it is placed in markup.

use std::fmt::Write;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

fn errors_html(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("<div class=\"form-error\">{}</div>", escape(e)))
        .collect()
}

pub fn input(kind: &str, name: &str, label: &str, value: &str, errors: &[String]) -> String {
    format!(
        "<div class=\"form-row\"><label for=\"{name}\">{label}</label><input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">{errors}</div>",
        name = escape(name),
        label = escape(label),
        kind = kind,
        value = escape(value),
        errors = errors_html(errors),
    )
}

pub fn text_input(name: &str, label: &str, value: &str, errors: &[String]) -> String {
    input("text", name, label, value, errors)
}

pub fn password_input(name: &str, label: &str, errors: &[String]) -> String {
    input("password", name, label, "", errors)
}

pub fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        escape(name),
        escape(value)
    )
}

pub fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        "<div class=\"form-row\"><label><input type=\"checkbox\" name=\"{}\" value=\"y\"{}> {}</label></div>",
        escape(name),
        if checked { " checked" } else { "" },
        escape(label)
    )
}

/// `options` are (value, label) pairs
pub fn select(
    name: &str,
    label: &str,
    options: &[(String, String)],
    selected: &str,
    errors: &[String],
) -> String {
    let mut html = format!(
        "<div class=\"form-row\"><label for=\"{name}\">{label}</label><select id=\"{name}\" name=\"{name}\">",
        name = escape(name),
        label = escape(label)
    );
    for (value, text) in options {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(value),
            if value == selected { " selected" } else { "" },
            escape(text)
        );
    }
    html.push_str("</select>");
    html.push_str(&errors_html(errors));
    html.push_str("</div>");
    html
}

pub fn form(action: &str, fields: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\">{}<button type=\"submit\">{}</button></form>",
        escape(action),
        fields,
        escape(submit)
    )
}

/// Inline form with a single button, for POST-only actions
pub fn button_form(action: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\" class=\"inline\"><button type=\"submit\">{}</button></form>",
        escape(action),
        escape(label)
    )
}

/// `rows` cells are already escaped HTML
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table class=\"data\"><thead><tr>");
    for h in headers {
        let _ = write!(html, "<th>{}</th>", escape(h));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", cell);
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_select_marks_choice() {
        let options = vec![
            ("1".to_string(), "Springfield".to_string()),
            ("2".to_string(), "Shelbyville".to_string()),
        ];
        let html = select("dept", "Department", &options, "2", &[]);
        assert!(html.contains("<option value=\"2\" selected>Shelbyville</option>"));
        assert!(html.contains("<option value=\"1\">Springfield</option>"));
    }

    #[test]
    fn test_input_shows_errors() {
        let html = text_input("email", "Email", "a<b", &["Invalid email address.".into()]);
        assert!(html.contains("value=\"a&lt;b\""));
        assert!(html.contains("Invalid email address."));
    }
}
