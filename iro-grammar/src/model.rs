//! Grammar model types
//!
//! These types are plain data: they carry no behavior besides construction helpers and lookups.
//! They derive serde so that an already-parsed grammar can be stored and reloaded (see
//! [loader](crate::loader)).

use serde::{Deserialize, Serialize};

/// Name of the context every grammar starts in.
pub const MAIN_CONTEXT: &str = "main";

/// A complete, already-parsed grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarSpec {
    /// Grammar name, also used as the suffix of every emitted scope.
    pub name: String,
    #[serde(default)]
    pub file_extensions: Vec<String>,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl GrammarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        GrammarSpec {
            name: name.into(),
            file_extensions: Vec::new(),
            uuid: String::new(),
            styles: Vec::new(),
            contexts: Vec::new(),
        }
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extensions.push(extension.into());
        self
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// Look up a declared context by name
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.context(name).is_some()
    }
}

/// A named classification with one scope per compile target.
///
/// Only the scope of the target being compiled is read; a style may leave the others unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textmate_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ace_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pygments_scope: Option<String>,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Style {
            name: name.into(),
            textmate_scope: None,
            ace_scope: None,
            pygments_scope: None,
        }
    }

    pub fn with_textmate_scope(mut self, scope: impl Into<String>) -> Self {
        self.textmate_scope = Some(scope.into());
        self
    }

    pub fn with_ace_scope(mut self, scope: impl Into<String>) -> Self {
        self.ace_scope = Some(scope.into());
        self
    }

}

/// A named tokenizer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub members: Vec<RuleMember>,
}

impl Context {
    pub fn new(name: impl Into<String>, members: Vec<RuleMember>) -> Self {
        Context {
            name: name.into(),
            members,
        }
    }
}

/// One rule inside a context.
///
/// Stored with an internal `type` tag. Tags this version does not know about load as
/// [RuleMember::Unrecognized] instead of failing, so older tools can still read newer models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum RuleMember {
    /// Pull in every rule of another context.
    Include { context: String },
    Pattern(Pattern),
    InlinePush(InlinePush),
    /// Switch to a named context on match.
    Push {
        regex: String,
        styles: Vec<String>,
        context: String,
    },
    /// Return to the previous context on match.
    Pop { regex: String, styles: Vec<String> },
    /// A member whose `type` tag is unknown; only the tag is kept.
    Unrecognized { kind: String },
}

impl RuleMember {
    pub fn include(context: impl Into<String>) -> Self {
        RuleMember::Include {
            context: context.into(),
        }
    }

    pub fn pattern(regex: impl Into<String>, styles: &[&str]) -> Self {
        RuleMember::Pattern(Pattern::new(regex, styles))
    }

    /// Kind name, as written in the `type` tag
    pub fn kind(&self) -> &str {
        match self {
            RuleMember::Include { .. } => "include",
            RuleMember::Pattern(_) => "pattern",
            RuleMember::InlinePush(_) => "inline_push",
            RuleMember::Push { .. } => "push",
            RuleMember::Pop { .. } => "pop",
            RuleMember::Unrecognized { kind } => kind,
        }
    }
}

/// Stored form of the member kinds this version knows
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedMember {
    Include {
        context: String,
    },
    Pattern(Pattern),
    InlinePush(InlinePush),
    Push {
        regex: String,
        #[serde(default)]
        styles: Vec<String>,
        context: String,
    },
    Pop {
        regex: String,
        #[serde(default)]
        styles: Vec<String>,
    },
}

const KNOWN_KINDS: [&str; 5] = ["include", "pattern", "inline_push", "push", "pop"];

impl TryFrom<serde_json::Value> for RuleMember {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| "rule member has no `type` tag".to_string())?;
        if !KNOWN_KINDS.contains(&kind) {
            return Ok(RuleMember::Unrecognized {
                kind: kind.to_string(),
            });
        }

        let tagged: TaggedMember = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Ok(match tagged {
            TaggedMember::Include { context } => RuleMember::Include { context },
            TaggedMember::Pattern(pattern) => RuleMember::Pattern(pattern),
            TaggedMember::InlinePush(push) => RuleMember::InlinePush(push),
            TaggedMember::Push {
                regex,
                styles,
                context,
            } => RuleMember::Push {
                regex,
                styles,
                context,
            },
            TaggedMember::Pop { regex, styles } => RuleMember::Pop { regex, styles },
        })
    }
}

impl From<RuleMember> for serde_json::Value {
    fn from(member: RuleMember) -> Self {
        let tagged = match member {
            RuleMember::Unrecognized { kind } => return serde_json::json!({ "type": kind }),
            RuleMember::Include { context } => TaggedMember::Include { context },
            RuleMember::Pattern(pattern) => TaggedMember::Pattern(pattern),
            RuleMember::InlinePush(push) => TaggedMember::InlinePush(push),
            RuleMember::Push {
                regex,
                styles,
                context,
            } => TaggedMember::Push {
                regex,
                styles,
                context,
            },
            RuleMember::Pop { regex, styles } => TaggedMember::Pop { regex, styles },
        };
        // string keys only, so conversion cannot fail
        serde_json::to_value(tagged).unwrap_or(serde_json::Value::Null)
    }
}

/// A single-regex rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub regex: String,
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Pattern {
    pub fn new(regex: impl Into<String>, styles: &[&str]) -> Self {
        Pattern {
            regex: regex.into(),
            styles: styles.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A begin/end rule with an optional nested rule set evaluated in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlinePush {
    pub begin: String,
    #[serde(default)]
    pub begin_styles: Vec<String>,
    #[serde(default)]
    pub members: Vec<RuleMember>,
    pub end: String,
    #[serde(default)]
    pub end_styles: Vec<String>,
}

impl InlinePush {
    pub fn new(begin: impl Into<String>, begin_styles: &[&str]) -> Self {
        InlinePush {
            begin: begin.into(),
            begin_styles: begin_styles.iter().map(|s| s.to_string()).collect(),
            members: Vec::new(),
            end: String::new(),
            end_styles: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: RuleMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_end(mut self, end: impl Into<String>, end_styles: &[&str]) -> Self {
        self.end = end.into();
        self.end_styles = end_styles.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl From<InlinePush> for RuleMember {
    fn from(push: InlinePush) -> Self {
        RuleMember::InlinePush(push)
    }
}

impl From<Pattern> for RuleMember {
    fn from(pattern: Pattern) -> Self {
        RuleMember::Pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> GrammarSpec {
        GrammarSpec::new("demo")
            .with_file_extension("demo")
            .with_uuid("u1")
            .with_style(Style::new("kw").with_textmate_scope("keyword.demo"))
            .with_context(Context::new(
                "main",
                vec![RuleMember::pattern(r"\bif\b", &["kw"])],
            ))
    }

    #[test]
    fn test_lookups() {
        let grammar = demo();
        assert_eq!(
            grammar.style("kw").and_then(|s| s.textmate_scope.as_deref()),
            Some("keyword.demo")
        );
        assert!(grammar.style("missing").is_none());
        assert!(grammar.has_context(MAIN_CONTEXT));
        assert!(!grammar.has_context("other"));
    }

    #[test]
    fn test_member_kinds() {
        assert_eq!(RuleMember::include("x").kind(), "include");
        assert_eq!(RuleMember::pattern("a", &["kw"]).kind(), "pattern");
        let push: RuleMember = InlinePush::new("\"", &["str"]).with_end("\"", &["str"]).into();
        assert_eq!(push.kind(), "inline_push");
        let unknown = RuleMember::Unrecognized {
            kind: "eol_push".to_string(),
        };
        assert_eq!(unknown.kind(), "eol_push");
    }

    #[test]
    fn test_member_json_tags() {
        let json = r#"[
            {"type": "include", "context": "comments"},
            {"type": "pattern", "regex": "\\d+", "styles": ["num"]},
            {"type": "inline_push", "begin": "\"", "begin_styles": ["str"],
             "members": [{"type": "pattern", "regex": "\\\\.", "styles": ["esc"]}],
             "end": "\"", "end_styles": ["str"]},
            {"type": "pop", "regex": "\\)"},
            {"type": "eol_push"}
        ]"#;
        let members: Vec<RuleMember> = serde_json::from_str(json).unwrap();

        assert_eq!(members[0], RuleMember::include("comments"));
        assert_eq!(members[1], RuleMember::pattern(r"\d+", &["num"]));
        match &members[2] {
            RuleMember::InlinePush(push) => {
                assert_eq!(push.begin, "\"");
                assert_eq!(push.members.len(), 1);
                assert_eq!(push.end_styles, vec!["str".to_string()]);
            }
            other => panic!("Expected inline push, got {:?}", other),
        }
        assert!(matches!(&members[3], RuleMember::Pop { styles, .. } if styles.is_empty()));
        assert_eq!(
            members[4],
            RuleMember::Unrecognized {
                kind: "eol_push".to_string()
            }
        );
    }

    #[test]
    fn test_member_without_tag_is_rejected() {
        let result: Result<RuleMember, _> = serde_json::from_str(r#"{"regex": "a"}"#);
        assert!(result.unwrap_err().to_string().contains("`type`"));

        let result: Result<RuleMember, _> = serde_json::from_str(r#"{"type": "pattern"}"#);
        assert!(result.unwrap_err().to_string().contains("regex"));
    }

    #[test]
    fn test_members_store_their_tag() {
        let unknown = RuleMember::Unrecognized {
            kind: "macro".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&unknown).unwrap(),
            r#"{"type":"macro"}"#
        );

        let json = serde_json::to_value(RuleMember::include("comments")).unwrap();
        assert_eq!(json["type"], "include");
        assert_eq!(json["context"], "comments");
    }

    #[test]
    fn test_style_scopes_are_optional() {
        let style: Style = serde_json::from_str(r#"{"name": "plain"}"#).unwrap();
        assert_eq!(style, Style::new("plain"));

        let style: Style =
            serde_json::from_str(r#"{"name": "kw", "ace_scope": "keyword"}"#).unwrap();
        assert_eq!(style.ace_scope.as_deref(), Some("keyword"));
        assert!(style.textmate_scope.is_none());
    }
}
