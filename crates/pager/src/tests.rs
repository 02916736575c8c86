use assert_matches::assert_matches;
use rstest::rstest;

use super::*;

#[rstest]
#[case("less", "less", &[])]
#[case("less -r", "less", &["-r"])]
#[case("  more -R -F  ", "more", &["-R", "-F"])]
#[case(r#"pager "--prompt=a b""#, "pager", &["--prompt=a b"])]
fn command_parse_direct(#[case] input: &str, #[case] program: &str, #[case] args: &[&str]) {
    let command = PagerCommand::parse(input).unwrap();
    assert_eq!(
        command,
        PagerCommand::Direct {
            program: program.to_owned(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    );
    assert_eq!(command.program(), program);
}

#[rstest]
#[case("cat > output.txt", "cat")]
#[case("ruby pager.rb | tee log", "ruby")]
#[case("less $LESS_ARGS", "less")]
fn command_parse_shell(#[case] input: &str, #[case] program: &str) {
    let command = PagerCommand::parse(input).unwrap();
    assert_matches!(&command, PagerCommand::Shell { line, .. } if line == input);
    assert_eq!(command.program(), program);
    assert_eq!(command.to_string(), input);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn command_parse_blank(#[case] input: &str) {
    let result = PagerCommand::parse(input);
    assert_matches!(result, Err(ref e) if e.kind() == io::ErrorKind::InvalidInput);
}

#[test]
fn command_bare_drops_arguments() {
    let command = PagerCommand::parse("less -r -X").unwrap();
    assert_eq!(command.bare().to_string(), "less");

    let command = PagerCommand::parse("cat > out").unwrap();
    assert_eq!(
        command.bare(),
        PagerCommand::Direct {
            program: "cat".into(),
            args: vec![],
        }
    );
}

#[test]
fn command_display_quotes_arguments() {
    let command = PagerCommand::parse(r#"pager "a b""#).unwrap();
    assert_eq!(command.to_string(), r#"pager a\ b"#);
}

#[test]
fn pager_env_sets_env_var() {
    let pager = Pager::new(PagerCommand::parse("less").unwrap()).with_env_var("LESSCHARSET", "UTF-8");
    assert_eq!(pager.env.get("LESSCHARSET"), Some(&"UTF-8".to_string()));
}

#[test]
fn pager_envs_sets_multiple() {
    let pager = Pager::new(PagerCommand::parse("less").unwrap()).with_env([("A", "1"), ("B", "2")]);
    assert_eq!(pager.env.get("A"), Some(&"1".to_string()));
    assert_eq!(pager.env.get("B"), Some(&"2".to_string()));
}

#[test]
fn pager_nonexistent_binary_start_returns_error() {
    let command = PagerCommand::parse("/nonexistent/binary/pager_test_abc123").unwrap();
    assert!(Pager::new(command).start().is_err());
}

#[test]
fn pager_nonexistent_binary_probe_fails() {
    let command = PagerCommand::parse("/nonexistent/binary/pager_test_abc123").unwrap();
    assert!(!Pager::new(command).probe());
}

#[cfg(unix)]
#[test]
fn pager_probe_accepts_silent_command() {
    assert!(Pager::new(PagerCommand::parse("cat").unwrap()).probe());
}

#[cfg(unix)]
#[test]
fn pager_probe_rejects_noisy_command() {
    let command = PagerCommand::parse("echo unsupported option >&2").unwrap();
    assert!(!Pager::new(command).probe());
}

#[cfg(unix)]
#[test]
fn pager_probe_rejects_failing_command() {
    assert!(!Pager::new(PagerCommand::parse("false").unwrap()).probe());
}

#[cfg(unix)]
#[test]
fn pager_streams_input_to_process() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.txt");
    let command = PagerCommand::parse(&format!("cat > '{}'", path.display())).unwrap();

    let mut pager = Pager::new(command).start().unwrap();
    assert!(pager.id().is_some());
    pager.write_all(b"one\n").unwrap();
    pager.write_all(b"two\n").unwrap();
    let status = pager.finish().unwrap();

    assert_matches!(status, Some(status) if status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[cfg(unix)]
#[test]
fn pager_passes_env_to_process() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.txt");
    let command = PagerCommand::parse(&format!("printf %s \"$PAGER_TEST_VALUE\" > '{}'", path.display())).unwrap();

    let pager = Pager::new(command).with_env_var("PAGER_TEST_VALUE", "42").start().unwrap();
    pager.finish().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "42");
}

#[cfg(unix)]
#[test]
fn pager_finish_reports_failure() {
    let pager = Pager::new(PagerCommand::parse("false").unwrap()).start().unwrap();
    let status = pager.finish().unwrap();
    assert_matches!(status, Some(status) if !status.success());
}

#[cfg(unix)]
#[test]
fn pager_write_after_exit_is_broken_pipe() {
    let mut pager = Pager::new(PagerCommand::parse("true").unwrap()).start().unwrap();

    let mut error = None;
    for _ in 0..500 {
        if let Err(e) = pager.write_all(b"some text\n") {
            error = Some(e);
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    let error = error.expect("write should eventually fail");
    assert!(is_broken_pipe(&error), "unexpected error: {error}");
}

#[cfg(unix)]
#[test]
fn pager_dropped_without_finish() {
    let mut pager = Pager::new(PagerCommand::parse("cat > /dev/null").unwrap()).start().unwrap();
    pager.write_all(b"text").unwrap();
    drop(pager); // closes stdin and waits for cat to exit
}
