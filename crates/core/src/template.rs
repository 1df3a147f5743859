//! Command template rendering
//!
//! Templates use `{{.NAME}}` actions. Names are flat keys, so `{{.env.HOME}}`
//! looks up the key `env.HOME`. Unknown names render as an empty string.
//! `{{- ` and ` -}}` trim the whitespace before and after the action.

use crate::errors::{Error, Result};
use crate::types::Variables;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render a template against the merged variable environment
pub fn render(template: &str, variables: &Variables) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        output.push_str(&rest[..open]);

        let after_open = &rest[open + OPEN.len()..];
        let close = after_open
            .find(CLOSE)
            .ok_or_else(|| Error::template_render(template, "unclosed action"))?;
        let mut body = &after_open[..close];
        rest = &after_open[close + CLOSE.len()..];

        if let Some(stripped) = body.strip_prefix("- ") {
            output.truncate(output.trim_end().len());
            body = stripped;
        }
        if let Some(stripped) = body.strip_suffix(" -") {
            rest = rest.trim_start();
            body = stripped;
        }

        let name = action_name(body.trim())
            .map_err(|message| Error::template_render(template, message))?;
        output.push_str(variables.get(name).unwrap_or_default());
    }

    output.push_str(rest);
    Ok(output)
}

fn action_name(body: &str) -> std::result::Result<&str, String> {
    let name = body
        .strip_prefix('.')
        .ok_or_else(|| format!("unsupported action '{body}', expected '.NAME'"))?;

    if name.is_empty() {
        return Err("empty variable name".to_string());
    }
    if let Some(bad) = name
        .chars()
        .find(|c| c.is_whitespace() || *c == '{' || *c == '}')
    {
        return Err(format!("invalid character {bad:?} in variable name '{name}'"));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(items: &[(&str, &str)]) -> Variables {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_basic() {
        let v = vars(&[("MSG", "hello"), ("env.HOME", "/home/user")]);
        let out = render("echo {{.MSG}} from {{ .env.HOME }}", &v).unwrap();
        assert_eq!(out, "echo hello from /home/user");
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let out = render("echo [{{.X}}]", &Variables::new()).unwrap();
        assert_eq!(out, "echo []");
    }

    #[test]
    fn test_plain_text_untouched() {
        let out = render("echo '}} not an action' | wc -c", &Variables::new()).unwrap();
        assert_eq!(out, "echo '}} not an action' | wc -c");
    }

    #[test]
    fn test_unclosed_action_fails() {
        let err = render("echo {{.MSG", &Variables::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateRender { .. }));
        assert!(err.to_string().contains("unclosed action"));
    }

    #[test]
    fn test_action_without_dot_fails() {
        let err = render("echo {{ MSG }}", &vars(&[("MSG", "x")])).unwrap_err();
        assert!(err.to_string().contains("expected '.NAME'"));
    }

    #[test]
    fn test_bare_dot_fails() {
        assert!(render("{{.}}", &Variables::new()).is_err());
    }

    #[test]
    fn test_trim_markers() {
        let v = vars(&[("A", "x")]);
        let out = render("a   {{- .A -}}   b", &v).unwrap();
        assert_eq!(out, "axb");
    }

    #[test]
    fn test_adjacent_actions() {
        let v = vars(&[("A", "1"), ("B", "2")]);
        assert_eq!(render("{{.A}}{{.B}}", &v).unwrap(), "12");
    }

    proptest::proptest! {
        #[test]
        fn prop_text_without_actions_is_unchanged(text in "[^{]*") {
            let out = render(&text, &Variables::new()).unwrap();
            proptest::prop_assert_eq!(out, text);
        }

        #[test]
        fn prop_known_variable_is_substituted(
            name in "[A-Za-z_][A-Za-z0-9_.]{0,12}",
            value in "[^{}]{0,20}",
        ) {
            let v = vars(&[(name.as_str(), value.as_str())]);
            let out = render(&format!("<{{{{.{name}}}}}>"), &v).unwrap();
            proptest::prop_assert_eq!(out, format!("<{value}>"));
        }
    }
}
