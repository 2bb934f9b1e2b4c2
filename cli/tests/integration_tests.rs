#[cfg(test)]
mod cli_integration_tests {
    use assert_cmd::Command;
    use pretty_assertions::assert_eq;

    macro_rules! assert_command {
        ($command:expr) => {{
            let mut args: Vec<&str> = $command.split_whitespace().collect();

            let command_name = args.remove(0);

            let mut cmd = Command::cargo_bin(command_name).unwrap();

            for arg in args {
                cmd.arg(arg);
            }

            let assert = cmd.assert();
            assert
        }};
    }

    #[test]
    fn no_args() {
        let mut cmd = Command::cargo_bin("pipeplate").unwrap();

        let assert = cmd.assert();

        let expected_stderr = textwrap::dedent(
            "
            Render and inspect templates

            Usage: pipeplate <COMMAND>

            Commands:
              render  Expand a template
              tokens  Print the tokens of a template as JSON
              ast     Print the syntax tree of a template as JSON
              check   Check that a template parses
              help    Print this message or the help of the given subcommand(s)

            Options:
              -h, --help     Print help
              -V, --version  Print version
            ",
        )
        .trim_start()
        .to_string();

        assert.failure().stderr(expected_stderr);
    }

    #[test]
    fn invalid_subcommand() {
        let assert = assert_command!("pipeplate foobar");

        let expected_stderr = textwrap::dedent(
            "
            error: unrecognized subcommand 'foobar'

            Usage: pipeplate <COMMAND>

            For more information, try '--help'.
            ",
        )
        .trim_start()
        .to_string();

        assert.failure().stderr(expected_stderr);
    }

    #[test]
    fn render() {
        let assert = assert_command!(
            "pipeplate render tests/fixtures/greeting.tmpl --vars tests/fixtures/greeting.json"
        );

        assert
            .success()
            .stdout("Hello Grace Hopper!\nItems: compiler, cobol\n");
    }

    #[test]
    fn render_with_separator() {
        let assert = assert_command!(
            "pipeplate render tests/fixtures/greeting.tmpl --vars tests/fixtures/greeting.json --separator /"
        );

        assert
            .success()
            .stdout("Hello Grace Hopper!\nItems: compiler/cobol\n");
    }

    #[test]
    fn render_without_vars() {
        let assert = assert_command!("pipeplate render tests/fixtures/greeting.tmpl");

        assert.success().stdout("Hello !\nItems: \n");
    }

    #[test]
    fn render_strict() {
        let assert = assert_command!("pipeplate render tests/fixtures/greeting.tmpl --strict");

        let output = assert.failure().code(1).get_output().clone();
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert!(
            stderr.starts_with(
                "error[ResolutionError]: Cannot resolve variable named \"name\" (strict mode set)"
            ),
            "{stderr}"
        );
        assert!(stderr.contains("tests/fixtures/greeting.tmpl:1:7"), "{stderr}");
    }

    #[test]
    fn render_with_config() {
        let assert = assert_command!(
            "pipeplate render tests/fixtures/markers.tmpl --vars tests/fixtures/greeting.json --config tests/fixtures/markers.toml"
        );

        assert.success().stdout("Hello grace hopper {name}\n");
    }

    #[test]
    fn render_with_marker_flags() {
        let assert = assert_command!(
            "pipeplate render tests/fixtures/markers.tmpl --vars tests/fixtures/greeting.json --open <% --close %>"
        );

        assert.success().stdout("Hello grace hopper {name}\n");
    }

    #[test]
    fn render_missing_file() {
        let assert = assert_command!("pipeplate render tests/fixtures/missing.tmpl");

        let output = assert.failure().code(2).get_output().clone();
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert!(
            stderr.starts_with("Could not read tests/fixtures/missing.tmpl: "),
            "{stderr}"
        );
    }

    #[test]
    fn tokens() {
        let assert = assert_command!("pipeplate tokens tests/fixtures/short.tmpl");

        let output = assert.success().get_output().clone();
        let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        let kinds: Vec<&str> = tokens
            .as_array()
            .unwrap()
            .iter()
            .map(|token| token["kind"].as_str().unwrap())
            .collect();

        assert_eq!(
            vec!["RawText", "BlockOpen", "Ident", "BlockClose", "RawText"],
            kinds
        );
    }

    #[test]
    fn ast() {
        let assert = assert_command!("pipeplate ast tests/fixtures/short.tmpl");

        let output = assert.success().get_output().clone();
        let ast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        assert_eq!(
            serde_json::json!([
                [{ "RawText": "hi " }, { "start": 0, "end": 3 }],
                [
                    {
                        "Block": {
                            "optional": false,
                            "head": { "FunctionOrVariable": "n" },
                            "filters": []
                        }
                    },
                    { "start": 3, "end": 6 }
                ],
                [{ "RawText": "!" }, { "start": 6, "end": 7 }]
            ]),
            ast
        );
    }

    #[test]
    fn check_valid() {
        assert_command!("pipeplate check tests/fixtures/greeting.tmpl")
            .success()
            .stdout("");
    }

    #[test]
    fn check_invalid() {
        let assert = assert_command!("pipeplate check tests/fixtures/unclosed.tmpl");

        let output = assert.failure().code(1).get_output().clone();
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert!(stderr.starts_with("error[SyntaxError]: "), "{stderr}");
    }
}
