use rstest::rstest;
use unicode_width::UnicodeWidthStr;

use super::*;

#[test]
fn test_wrap_at_whitespace() {
    let line = "It is not down on any map; true places never are.\n";
    assert_eq!(
        wrap(line, 10),
        vec!["It is not ", "down on ", "any map; ", "true ", "places ", "never are.\n"]
    );
}

#[test]
fn test_wrap_long_sentence() {
    let line = "The more so, I say, because truly to enjoy bodily warmth, some small part of you \
                must be cold, for there is no quality in this world that is not what it is merely \
                by contrast.\n";
    assert_eq!(
        wrap(line, 40),
        vec![
            "The more so, I say, because truly to ",
            "enjoy bodily warmth, some small part of ",
            "you must be cold, for there is no ",
            "quality in this world that is not what ",
            "it is merely by contrast.\n",
        ]
    );
}

#[rstest]
#[case("", 10, &[])]
#[case("\n", 10, &["\n"])]
#[case("short\n", 80, &["short\n"])]
#[case("no newline", 80, &["no newline"])]
#[case("one two\r\n", 4, &["one ", "two\r\n"])]
fn test_wrap_simple(#[case] line: &str, #[case] width: usize, #[case] expected: &[&str]) {
    assert_eq!(wrap(line, width), expected);
}

#[rstest]
#[case("abcdefghijkl", 5, &["abcde", "fghij", "kl"])]
#[case("ab abcdefghij cd", 4, &["ab ", "abcd", "efgh", "ij ", "cd"])]
#[case("    indented text", 10, &["    indent", "ed text"])]
#[case("日本語の文章", 4, &["日本", "語の", "文章"])]
fn test_wrap_hard_break(#[case] line: &str, #[case] width: usize, #[case] expected: &[&str]) {
    assert_eq!(wrap(line, width), expected);
}

#[test]
fn test_wrap_zero_width_is_one_column() {
    assert_eq!(wrap("ab\n", 0), vec!["a", "b\n"]);
}

#[rstest]
#[case("I try all things, I achieve what I can.\n")]
#[case("   leading and trailing blanks   \n")]
#[case("a\tb\tc  d    e")]
#[case("supercalifragilisticexpialidocious is a word\n")]
#[case("Ünïcödé wörds ünd 日本語の文章も\r\n")]
fn test_wrap_round_trip(#[case] line: &str) {
    for width in 1..=20 {
        let fragments = wrap(line, width);
        assert_eq!(fragments.concat(), line, "width {width}");
        for fragment in &fragments {
            let visible = fragment.trim_end().width();
            assert!(visible <= width.max(2), "fragment {fragment:?} is too wide for {width}");
        }
    }
}

#[test]
fn test_reflow_line_terminates_fragments() {
    assert_eq!(
        reflow_line("It is not down on any map;", 10),
        vec!["It is not \n", "down on \n", "any map;"]
    );
}

#[test]
fn test_reflow_prompt() {
    let prompt = "\n--- Page -1- Press enter/return to continue (or q to quit) ---";
    assert_eq!(
        reflow(prompt, 40),
        "\n--- Page -1- Press enter/return to \ncontinue (or q to quit) ---"
    );
    assert_eq!(reflow(prompt, 80), prompt);
}

#[rstest]
#[case("\n--- Page -100- Press enter/return to continue (or q to quit) ---", 80, 2)]
#[case("\n--- Page -100- Press enter/return to continue (or q to quit) ---", 40, 3)]
#[case("Page 100\non multiline\n", 80, 2)]
#[case("Page -100-", 80, 1)]
#[case("", 80, 0)]
fn test_line_count(#[case] text: &str, #[case] width: usize, #[case] expected: usize) {
    assert_eq!(line_count(text, width), expected);
}
