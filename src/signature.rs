//! Declaration heuristics: derive `@param` / `@return` lines from one header line.
//!
//! There is no C++ parser behind this. A declaration is whatever fits on a
//! single physical line:
//!
//! - the **head** is the text before the first `(`, split on whitespace; its
//!   last token is the method name, everything before it the return type
//! - the **parameter list** is the text between the first `(` and the last
//!   `)`, split naively on `,`
//!
//! Template arguments containing commas and signatures spanning several lines
//! are known limitations and come out wrong or not at all.

use std::borrow::Cow;

/// Prefix of every generated parameter line.
pub const PARAM_MARKER: &str = "/// @param ";

/// Prefix of every generated return line.
pub const RETURN_MARKER: &str = "/// @return ";

/// Declaration modifiers that are not part of a return type.
const MODIFIERS: &[&str] = &[" static ", " inline ", " virtual "];

/// One source line viewed as a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Leading whitespace, copied onto every generated line.
    pub indent: &'a str,
    /// Raw fragments between the first `(` and the last `)`, trailing empty
    /// ones dropped. `None` when either paren is missing or the list is blank.
    pub params: Option<Vec<&'a str>>,
    /// Whitespace-split tokens before the first `(`.
    pub head: Vec<&'a str>,
}

impl<'a> Declaration<'a> {
    pub fn parse(line: &'a str) -> Self {
        let before_paren = line.split_once('(').map_or(line, |(head, _)| head);
        Declaration {
            indent: leading_whitespace(line),
            params: parameter_list(line),
            head: before_paren.split_whitespace().collect(),
        }
    }

    /// One `/// @param` line per parameter fragment, newline-joined.
    pub fn param_comment(&self) -> Option<String> {
        let params = self.params.as_ref()?;
        let lines: Vec<String> = params
            .iter()
            .map(|fragment| format!("{}{}{}", self.indent, PARAM_MARKER, render_param(fragment)))
            .collect();
        Some(lines.join("\n"))
    }

    /// The `/// @return` line, or `None` for constructors and destructors
    /// (nothing precedes the name).
    pub fn return_comment(&self) -> Option<String> {
        let (name, rest) = self.head.split_last()?;
        let mut tokens = rest.to_vec();
        // `int *create()` returns `int *`, the sigil stays and the name goes
        if name.starts_with('*') {
            tokens.push("*");
        } else if name.starts_with('&') {
            tokens.push("&");
        }
        if tokens.is_empty() {
            return None;
        }

        let mut comment = format!("{}{}{}", self.indent, RETURN_MARKER, tokens.join(" "));
        for modifier in MODIFIERS {
            comment = comment.replacen(modifier, " ", 1);
        }
        Some(comment)
    }
}

/// Generate the doc lines for a declaration line.
///
/// Returns `None` for comment lines and for lines that yield neither a
/// parameter nor a return comment. When both are present the parameter
/// lines come first.
pub fn method_comments(line: &str) -> Option<String> {
    if line.trim_start().starts_with('/') {
        return None;
    }

    let line = strip_explicit(line);
    let decl = Declaration::parse(&line);
    match (decl.param_comment(), decl.return_comment()) {
        (Some(params), Some(ret)) => Some(format!("{}\n{}", params, ret)),
        (Some(comment), None) | (None, Some(comment)) => Some(comment),
        (None, None) => None,
    }
}

/// Render one parameter fragment as `name type [(Defaults to value.)]`.
///
/// ```text
/// "QWidget *parent = 0"    -> "parent QWidget * (Defaults to 0.)"
/// "const QString &value"   -> "value const QString &"
/// ```
pub fn render_param(fragment: &str) -> String {
    let fragment = fragment.trim();
    let (declarator, default) = match fragment.split_once('=') {
        Some((declarator, value)) => (declarator, Some(value.trim())),
        None => (fragment, None),
    };

    let declarator = declarator.trim();
    let (mut ty, mut name) = match declarator.rsplit_once(char::is_whitespace) {
        Some((head, last)) => (Cow::Borrowed(head.trim_end()), last),
        None => (Cow::Borrowed(""), declarator),
    };

    if name.starts_with('*') || name.starts_with('&') {
        let (sigil, rest) = name.split_at(1);
        ty = if ty.is_empty() {
            Cow::Borrowed(sigil)
        } else {
            Cow::Owned(format!("{} {}", ty, sigil))
        };
        name = rest;
    }

    let mut parts = vec![name];
    if !ty.is_empty() {
        parts.push(&ty);
    }
    let mut rendered = parts.join(" ");
    if let Some(value) = default.filter(|v| !v.is_empty()) {
        rendered.push_str(&format!(" (Defaults to {}.)", value));
    }
    rendered
}

/// `explicit` constructors are documented like any other constructor.
fn strip_explicit(line: &str) -> Cow<'_, str> {
    if line.contains(" explicit ") {
        Cow::Owned(line.replacen(" explicit ", " ", 1))
    } else {
        Cow::Borrowed(line)
    }
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn parameter_list(line: &str) -> Option<Vec<&str>> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    if close < open {
        return None;
    }
    let inner = line[open + 1..close].trim();
    if inner.is_empty() {
        return None;
    }
    let mut fragments: Vec<&str> = inner.split(',').collect();
    // `f(int a, )` has one parameter, not two
    while fragments.last().is_some_and(|f| f.trim().is_empty()) {
        fragments.pop();
    }
    (!fragments.is_empty()).then_some(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param_comment(line: &str) -> Option<String> {
        Declaration::parse(line).param_comment()
    }

    fn return_comment(line: &str) -> Option<String> {
        Declaration::parse(line).return_comment()
    }

    #[test]
    fn default_value_in_comment() {
        assert_eq!(
            param_comment("explicit SequenceTextView(QWidget *parent = 0);").as_deref(),
            Some("/// @param parent QWidget * (Defaults to 0.)")
        );
    }

    #[test]
    fn single_reference_parameter() {
        assert_eq!(
            param_comment("void setText(const QString &value);").as_deref(),
            Some("/// @param value const QString &")
        );
    }

    #[test]
    fn multiple_parameters_in_order() {
        let line = "PrimerDesignWizard(QWidget *parent, DnaSequence *sequence, int index, const PrimerDesignInput *params);";
        assert_eq!(
            param_comment(line).as_deref(),
            Some(
                "/// @param parent QWidget *\n\
                 /// @param sequence DnaSequence *\n\
                 /// @param index int\n\
                 /// @param params const PrimerDesignInput *"
            )
        );
    }

    #[test]
    fn unterminated_signature_has_no_params() {
        assert_eq!(param_comment("PrimerDesignWizard(Foo *bar,"), None);
    }

    #[test]
    fn zero_parameters_has_no_params() {
        assert_eq!(param_comment("int count() const;"), None);
        assert_eq!(param_comment("int count(   ) const;"), None);
    }

    #[test]
    fn trailing_comma_adds_no_empty_param() {
        assert_eq!(
            param_comment("    void f(int a, );").as_deref(),
            Some("    /// @param a int")
        );
        assert_eq!(param_comment("void f(int a,,);").as_deref(), Some("/// @param a int"));
        assert_eq!(param_comment("void f(,);"), None);
    }

    #[test]
    fn close_paren_before_open_is_ignored() {
        assert_eq!(param_comment("x) y(z"), None);
    }

    #[test]
    fn modifiers_stripped_from_return() {
        assert_eq!(
            return_comment("static virtual inline int foo()").as_deref(),
            Some("/// @return int")
        );
    }

    #[test]
    fn pointer_and_reference_returns() {
        assert_eq!(
            return_comment("    QWidget *createEditor(int row);").as_deref(),
            Some("    /// @return QWidget *")
        );
        assert_eq!(
            return_comment("    const QString &name() const;").as_deref(),
            Some("    /// @return const QString &")
        );
    }

    #[test]
    fn constructor_and_destructor_have_no_return() {
        assert_eq!(return_comment("    Foo(int a);"), None);
        assert_eq!(return_comment("    ~Foo();"), None);
        assert_eq!(return_comment("(int a)"), None);
    }

    #[test]
    fn comment_line_ignored() {
        assert_eq!(method_comments("//static inline int foo()"), None);
        assert_eq!(method_comments("    /* int foo(); */"), None);
    }

    #[test]
    fn explicit_constructor_without_params() {
        assert_eq!(method_comments(" explicit foo()"), None);
    }

    #[test]
    fn explicit_constructor_with_params() {
        assert_eq!(
            method_comments("    explicit Foo(QObject *parent = 0);").as_deref(),
            Some("    /// @param parent QObject * (Defaults to 0.)")
        );
    }

    #[test]
    fn params_then_return() {
        assert_eq!(
            method_comments("    virtual bool setData(int row, const QVariant &value);").as_deref(),
            Some(
                "    /// @param row int\n\
                 \x20   /// @param value const QVariant &\n\
                 \x20   /// @return bool"
            )
        );
    }

    #[test]
    fn zero_param_method_yields_only_return() {
        let comments = method_comments("    int rowCount() const;").unwrap();
        assert_eq!(comments, "    /// @return int");
        assert_eq!(comments.matches("@return").count(), 1);
        assert_eq!(comments.matches("@param").count(), 0);
    }

    #[test]
    fn one_param_line_per_fragment() {
        let comments = param_comment("void f(int a, int b, int c, int d, int e);").unwrap();
        let names: Vec<_> = comments
            .lines()
            .map(|l| l.trim_start_matches(PARAM_MARKER).split(' ').next().unwrap())
            .collect();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn render_default_keeps_later_equals() {
        assert_eq!(render_param("bool eq = a == b"), "eq bool (Defaults to a == b.)");
    }

    #[test]
    fn render_unnamed_parameter() {
        assert_eq!(render_param("int"), "int");
        assert_eq!(render_param(" *p "), "p *");
    }

    #[test]
    fn render_double_pointer_keeps_inner_sigil() {
        assert_eq!(render_param("char **argv"), "*argv char *");
    }

    #[test]
    fn render_collapses_whitespace_before_name() {
        assert_eq!(render_param("const QString   &value"), "value const QString &");
    }

    #[test]
    fn render_blank_default_is_dropped() {
        assert_eq!(render_param("int a ="), "a int");
    }
}
