/// Replace `${ENV_VAR}` placeholders in a raw config string.
///
/// Unresolvable or malformed placeholders are left as-is so the TOML parse
/// error (if any) points at the original text.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        (name == "REELAY_TEST_TOKEN").then(|| "tok-123".to_string())
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_with("token = \"${REELAY_TEST_TOKEN}\"", lookup),
            "token = \"tok-123\""
        );
    }

    #[test]
    fn leaves_unknown_var_intact() {
        assert_eq!(substitute_with("${NOT_SET_ANYWHERE}", lookup), "${NOT_SET_ANYWHERE}");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(substitute_with("no placeholders", lookup), "no placeholders");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(substitute_with("x ${BROKEN", lookup), "x ${BROKEN");
    }
}
