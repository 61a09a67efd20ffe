//! Style resolution
//!
//! Turns the style names declared on a rule into styles from the grammar's style table,
//! checking that each one carries a TextMate scope.

use iro_grammar::{GrammarSpec, Style};

/// A style known to have a TextMate scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle<'g> {
    pub style: &'g Style,
    pub scope: &'g str,
}

impl ResolvedStyle<'_> {
    /// Full scope name as emitted: `<scope>.<grammar name>`
    pub fn scope_name(&self, grammar_name: &str) -> String {
        format!("{}.{}", self.scope, grammar_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The rule declares no style at all
    NoStyles,
    /// A name missing from the style table
    Unknown(String),
    /// A style without a (non-empty) TextMate scope
    MissingScope(String),
}

/// Resolve style names in declaration order
///
/// Every name is looked up before any scope is checked, so an unknown name wins over a
/// missing scope wherever the two appear in the list.
pub fn resolve<'g>(
    names: &[String],
    grammar: &'g GrammarSpec,
) -> Result<Vec<ResolvedStyle<'g>>, StyleError> {
    if names.is_empty() {
        return Err(StyleError::NoStyles);
    }

    let styles = names
        .iter()
        .map(|name| {
            grammar
                .style(name)
                .ok_or_else(|| StyleError::Unknown(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    styles
        .into_iter()
        .map(|style| match style.textmate_scope.as_deref() {
            Some(scope) if !scope.is_empty() => Ok(ResolvedStyle { style, scope }),
            _ => Err(StyleError::MissingScope(style.name.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> GrammarSpec {
        GrammarSpec::new("demo")
            .with_style(Style::new("kw").with_textmate_scope("keyword.demo"))
            .with_style(Style::new("num").with_textmate_scope("constant.numeric"))
            .with_style(Style::new("ace_only").with_ace_scope("keyword"))
            .with_style(Style::new("blank").with_textmate_scope(""))
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_in_order() {
        let grammar = grammar();
        let styles = resolve(&names(&["num", "kw", "num"]), &grammar).unwrap();

        let scopes: Vec<_> = styles.iter().map(|s| s.scope).collect();
        assert_eq!(scopes, vec!["constant.numeric", "keyword.demo", "constant.numeric"]);
        assert_eq!(styles[1].style.name, "kw");
        assert_eq!(styles[1].scope_name("demo"), "keyword.demo.demo");
    }

    #[test]
    fn test_no_styles() {
        let grammar = grammar();
        assert_eq!(resolve(&[], &grammar), Err(StyleError::NoStyles));
    }

    #[test]
    fn test_unknown_style() {
        let grammar = grammar();
        assert_eq!(
            resolve(&names(&["kw", "missing"]), &grammar),
            Err(StyleError::Unknown("missing".to_string()))
        );
    }

    #[test]
    fn test_unknown_name_reported_before_missing_scope() {
        let grammar = grammar();
        assert_eq!(
            resolve(&names(&["ace_only", "missing"]), &grammar),
            Err(StyleError::Unknown("missing".to_string()))
        );
        assert_eq!(
            resolve(&names(&["kw", "blank", "num"]), &grammar),
            Err(StyleError::MissingScope("blank".to_string()))
        );
    }

    #[test]
    fn test_missing_or_empty_scope() {
        let grammar = grammar();
        assert_eq!(
            resolve(&names(&["ace_only"]), &grammar),
            Err(StyleError::MissingScope("ace_only".to_string()))
        );
        assert_eq!(
            resolve(&names(&["blank"]), &grammar),
            Err(StyleError::MissingScope("blank".to_string()))
        );
    }
}
