//! Integration tests for CLI commands

use std::fs;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run quill and capture output
fn quill(args: &[&str]) -> (String, String, Option<i32>) {
    let output = Command::new(env!("CARGO_BIN_EXE_quill"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute quill");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (stdout, stderr, output.status.code())
}

const DOCUMENT: &str = r#"
templates:
  property:
    - "public "
    - scalar: string
    - " Name { get; set; }"
  user:
    - "public class User\n{\n    "
    - sequence:
        - include: property
        - "public int Age { get; set; }"
    - "\n}\n"
  banner:
    - "// generated\n"
    - scalar: "   "
    - "\n// end"
outputs:
  User.cs: user
  Banner.txt: banner
"#;

const USER_CS: &str =
    "public class User\n{\n    public string Name { get; set; }\n    public int Age { get; set; }\n}";

fn workspace(document: &str) -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("models.yaml");
    fs::write(&path, document).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

mod render_command {
    use super::*;

    #[test]
    fn test_render_to_stdout() {
        let (_dir, doc) = workspace(DOCUMENT);
        let (stdout, stderr, code) = quill(&["render", &doc]);

        assert_eq!(code, Some(0), "stderr: {}", stderr);
        assert!(stdout.contains("# Output: User.cs"));
        assert!(stdout.contains(USER_CS));
        assert!(stdout.contains("# Output: Banner.txt"));
        assert!(stdout.contains("// generated\n\n// end"));
    }

    #[test]
    fn test_render_keep_whitespace() {
        let (_dir, doc) = workspace(DOCUMENT);
        let (stdout, _, code) = quill(&["render", &doc, "--only", "Banner.txt", "--keep-whitespace"]);

        assert_eq!(code, Some(0));
        assert!(stdout.contains("// generated\n   \n// end"));
        assert!(!stdout.contains("User.cs"));
    }

    #[test]
    fn test_render_to_directory() {
        let (dir, doc) = workspace(DOCUMENT);
        let out = dir.path().join("out");

        let (stdout, _, code) = quill(&["render", &doc, "--output-dir", &out.to_string_lossy()]);

        assert_eq!(code, Some(0));
        assert!(stdout.contains("wrote"));
        assert_eq!(fs::read_to_string(out.join("User.cs")).unwrap(), USER_CS);
        assert!(out.join("Banner.txt").exists());
    }

    #[test]
    fn test_render_unknown_only() {
        let (_dir, doc) = workspace(DOCUMENT);
        let (_, stderr, code) = quill(&["render", &doc, "--only", "Nope.cs"]);

        assert_eq!(code, Some(64));
        assert!(stderr.contains("Unknown output: Nope.cs"));
        assert!(stderr.contains("User.cs"));
    }

    #[test]
    fn test_render_cycle_fails() {
        let (_dir, doc) = workspace("templates:\n  loop:\n    - include: loop\n");
        let (_, stderr, code) = quill(&["render", &doc]);

        assert_eq!(code, Some(3));
        assert!(stderr.contains("Cyclic template: loop -> loop"));
    }

    #[test]
    fn test_render_depth_limit_flag() {
        let (_dir, doc) = workspace(
            "templates:\n  deep:\n    - template:\n        - template:\n            - \"x\"\n",
        );

        let (stdout, _, code) = quill(&["render", &doc]);
        assert_eq!(code, Some(0));
        assert!(stdout.contains("x"));

        let (_, stderr, code) = quill(&["render", &doc, "--max-depth", "1"]);
        assert_eq!(code, Some(3));
        assert!(stderr.contains("exceeds the limit of 1"));
    }

    #[test]
    fn test_render_unsupported_value() {
        let (_dir, doc) = workspace("templates:\n  a:\n    - lambda: x\n");
        let (_, stderr, code) = quill(&["render", &doc]);

        assert_eq!(code, Some(4));
        assert!(stderr.contains("lambda"));
    }

    #[test]
    fn test_render_with_config_file() {
        let (dir, doc) = workspace(DOCUMENT);
        let config = dir.path().join("quill.yaml");
        fs::write(&config, "stripWhitespaceOnEmptyLines: false\n").unwrap();

        let (stdout, _, code) = quill(&[
            "render",
            &doc,
            "--only",
            "Banner.txt",
            "--config",
            &config.to_string_lossy(),
        ]);

        assert_eq!(code, Some(0));
        assert!(stdout.contains("// generated\n   \n// end"));
    }
}

mod check_command {
    use super::*;

    fn golden(dir: &TempDir, user: &str) -> String {
        let golden = dir.path().join("golden");
        fs::create_dir_all(&golden).unwrap();
        fs::write(golden.join("User.cs"), user).unwrap();
        fs::write(golden.join("Banner.txt"), "// generated\n\n// end\n").unwrap();
        golden.to_string_lossy().to_string()
    }

    #[test]
    fn test_check_passes() {
        let (dir, doc) = workspace(DOCUMENT);
        let golden = golden(&dir, &format!("{}\n", USER_CS));

        let (stdout, stderr, code) = quill(&["check", &doc, &golden]);

        assert_eq!(code, Some(0), "stderr: {}", stderr);
        assert!(stdout.contains("2 output(s) match"));
    }

    #[test]
    fn test_check_reports_diff() {
        let (dir, doc) = workspace(DOCUMENT);
        let golden = golden(&dir, &USER_CS.replace("Age", "Years"));

        let (stdout, stderr, code) = quill(&["check", &doc, &golden]);

        assert_eq!(code, Some(1));
        assert!(stdout.contains("-    public int Years { get; set; }"));
        assert!(stdout.contains("+    public int Age { get; set; }"));
        assert!(stderr.contains("1 of 2 output(s) do not match"));
    }

    #[test]
    fn test_check_missing_golden_file() {
        let (dir, doc) = workspace(DOCUMENT);
        let golden = golden(&dir, USER_CS);
        fs::remove_file(dir.path().join("golden/Banner.txt")).unwrap();

        let (stdout, _, code) = quill(&["check", &doc, &golden]);

        assert_eq!(code, Some(1));
        assert!(stdout.contains("Banner.txt: cannot read"));
    }
}

mod inspect_command {
    use super::*;

    #[test]
    fn test_inspect() {
        let (_dir, doc) = workspace(DOCUMENT);
        let (stdout, _, code) = quill(&["inspect", &doc]);

        assert_eq!(code, Some(0));
        assert!(stdout.contains("Templates"));
        assert!(stdout.contains("2 segment(s), 1 placeholder(s)"));
        assert!(stdout.contains("includes property"));
        assert!(stdout.contains("Outputs"));
        assert!(stdout.contains("User.cs"));
    }

    #[test]
    fn test_inspect_missing_document() {
        let (_, stderr, code) = quill(&["inspect", "/nonexistent/doc.yaml"]);

        assert_eq!(code, Some(4));
        assert!(stderr.contains("Failed to load"));
    }
}
