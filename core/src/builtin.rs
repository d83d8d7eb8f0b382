//! Built-in section layouts and key vocabulary for the editor help index.

use crate::types::{KeyCategory, KeySpec, ModeLayout};

/// Section layouts in document order.
///
/// Columns are byte offsets after each tab has been expanded to eight
/// spaces.
pub fn default_modes() -> Vec<ModeLayout> {
    vec![
        ModeLayout::new("insert", "1. Insert mode", 3, 16, None, 32),
        ModeLayout::new("ctrl-x", "commands in CTRL-X submode", 1, 24, None, 40),
        ModeLayout::new("completion", "commands in completion mode", 1, 16, None, 31),
        ModeLayout::new("normal", "2. Normal mode", 12, 16, Some(32), 35),
        ModeLayout::new("text-object", "2.1 Text objects", 5, 16, None, 35),
        ModeLayout::new("window", "2.2 Window commands", 3, 16, None, 32),
        ModeLayout::new(
            "square-bracket",
            "2.3 Square bracket commands",
            3,
            16,
            Some(32),
            35,
        ),
        ModeLayout::new("g", "2.4 Commands starting with 'g'", 3, 16, Some(32), 35),
        ModeLayout::new("z", "2.5 Commands starting with 'z'", 3, 16, Some(32), 35),
        ModeLayout::new("operator-pending", "2.6 Operator-pending mode", 5, 16, None, 32),
        ModeLayout::new("visual", "3. Visual mode", 6, 16, Some(32), 35),
        ModeLayout::new("command-line", "4. Command-line editing", 8, 16, None, 32),
        ModeLayout::new("terminal-job", "5. Terminal-Job mode", 7, 16, None, 32),
        ModeLayout::new("ex", "6. EX commands", 7, 16, None, 30),
    ]
}

const LITERALS: &[(&str, &str)] = &[
    ("DOUBLE_QUOTE", "\""),
    ("HASH", "#"),
    ("PERCENT", "%"),
    ("AMPERSAND", "&"),
    ("SINGLE_QUOTE", "'"),
    ("PAREN_OPEN", "("),
    ("PAREN_CLOSE", ")"),
    ("ANGLE_OPEN", "<"),
    ("ANGLE_CLOSE", ">"),
    ("BRACKET_OPEN", "["),
    ("BRACKET_CLOSE", "]"),
    ("CURLY_OPEN", "{"),
    ("CURLY_CLOSE", "}"),
    ("TILDE", "~"),
    ("ASTERISK", "*"),
    ("PLUS", "+"),
    ("BACK_TICK", "`"),
    ("PERIOD", "."),
    ("COMMA", ","),
    ("COLON", ":"),
    ("SEMICOLON", ";"),
    ("EXCLAMATION_MARK", "!"),
    ("QUESTION_MARK", "?"),
    ("EQUALS", "="),
    ("AT", "@"),
    ("FORWARD_SLASH", "/"),
    ("BACK_SLASH", "\\"),
    ("CARET", "^"),
    ("HYPHEN", "-"),
    ("UNDERSCORE", "_"),
    ("PIPE", "|"),
    ("DOLLAR_SIGN", "$"),
    ("0", "0"),
    ("1", "1"),
    ("2", "2"),
    ("3", "3"),
    ("4", "4"),
    ("5", "5"),
    ("6", "6"),
    ("7", "7"),
    ("8", "8"),
    ("9", "9"),
];

const NAMED: &[&str] = &[
    "BS",
    "End",
    "Home",
    "Left",
    "LeftMouse",
    "Del",
    "CR",
    "Right",
    "RightMouse",
    "Down",
    "Esc",
    "F1",
    "MiddleMouse",
    "Up",
    "Help",
    "Insert",
    "NL",
    "PageDown",
    "PageUp",
    "ScrollWheelDown",
    "ScrollWheelLeft",
    "ScrollWheelRight",
    "ScrollWheelUp",
    "Space",
    "Tab",
    "Undo",
];

const IDENTIFIERS: &[(&str, &[&str])] = &[
    ("pattern", &["{pattern}"]),
    ("char", &["{char}", "{char1}", "{char2}"]),
    ("count", &["{count}"]),
    ("expr", &["{expr}"]),
    ("filter", &["{filter}"]),
    ("height", &["{height}"]),
    ("mark", &["{mark}"]),
    ("mode", &["{mode}"]),
    ("motion", &["{motion}"]),
    ("number", &["{number}"]),
    ("range", &["{range}"]),
    ("register", &["{register}"]),
    ("regname", &["{regname}"]),
    ("other", &["other", "others"]),
];

const REGEX_CLASSES: &[(&str, &[&str])] = &[
    ("re_lower_alpha", &["{a-z}"]),
    ("re_alpha", &["{a-zA-Z}", "{A-Za-z}"]),
    ("re_alpha_numeric", &["{a-zA-Z0-9}"]),
    ("re_alpha_numeric_with_quote", &["{0-9a-zA-Z\"}"]),
    ("re_mark", &["{a-zA-Z0-9.%#:-\"}"]),
    ("re_mark_lower", &["{a-z0-9.%#:-\"}"]),
    ("re_mark_register", &["{0-9a-z\"%#*:=}"]),
];

const MULTIWORD: &[(&str, &str)] = &[
    ("SPACE_TO_TILDE", "<Space> to '~'"),
    ("META_CHARACTERS", "Meta characters (0x80 to 0xff, 128 to 255)"),
    ("A_TO_Z", "a - z"),
];

/// The key vocabulary used to decode index key notation.
///
/// Letters are registered under both cases and bound to the upper-case key.
pub fn default_vocabulary() -> Vec<KeySpec> {
    let mut keys = Vec::new();

    for &(name, pattern) in LITERALS {
        keys.push(KeySpec::new(name, &[pattern], KeyCategory::Literal));
    }
    for &name in NAMED {
        keys.push(KeySpec::new(name, &[name], KeyCategory::Named));
    }
    for &(name, patterns) in IDENTIFIERS {
        keys.push(KeySpec::new(name, patterns, KeyCategory::Identifier));
    }
    for &(name, patterns) in REGEX_CLASSES {
        keys.push(KeySpec::new(name, patterns, KeyCategory::Regex));
    }
    for upper in 'A'..='Z' {
        let upper = upper.to_string();
        let lower = upper.to_lowercase();
        keys.push(KeySpec::new(
            &upper,
            &[upper.as_str(), lower.as_str()],
            KeyCategory::Literal,
        ));
    }
    keys.push(KeySpec::new("CONTROL", &["CTRL-", "C-"], KeyCategory::Control));
    keys.push(KeySpec::new("ALT", &["ALT-", "A-"], KeyCategory::Alt));
    keys.push(KeySpec::new("SHIFT", &["SHIFT-", "S-"], KeyCategory::Shift));
    for &(name, pattern) in MULTIWORD {
        keys.push(KeySpec::new(name, &[pattern], KeyCategory::Multiword));
    }

    keys
}
