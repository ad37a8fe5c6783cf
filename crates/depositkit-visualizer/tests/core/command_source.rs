use std::io::Write;

use depositkit_core::{AxisFill, Error, GcodeError};
use depositkit_visualizer::{read_commands_from_file, MotionCommand, MotionMode, ParserOptions};

#[test]
fn test_read_program_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "; skirt").unwrap();
    writeln!(file, "G0 X0 Y0 Z0").unwrap();
    writeln!(file, "G1 X0 Y0 Z-1").unwrap();
    writeln!(file, "G1 X0.5 (corner)").unwrap();

    let commands = read_commands_from_file(file.path(), ParserOptions::default()).unwrap();

    // The comment-only line still yields a command
    assert_eq!(commands.len(), 4);
    assert_eq!(commands[0], MotionCommand::default());
    assert_eq!(commands[2], MotionCommand::feed(0.0, 0.0, -1.0));
    assert_eq!(commands[3], MotionCommand::feed(0.5, 0.0, 0.0));
}

#[test]
fn test_carry_forward_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "G1 X1 Y2 Z3\nZ4\nG0\n").unwrap();

    let options = ParserOptions {
        axis_fill: AxisFill::CarryForward,
        strip_comments: true,
    };
    let commands = read_commands_from_file(file.path(), options).unwrap();

    assert_eq!(commands[1], MotionCommand::feed(1.0, 2.0, 4.0));
    assert_eq!(commands[2].mode, MotionMode::Rapid);
    assert_eq!(commands[2].position(), commands[1].position());
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.gcode");

    match read_commands_from_file(&path, ParserOptions::default()) {
        Err(Error::Gcode(GcodeError::OpenFailed { path: reported, .. })) => {
            assert!(reported.ends_with("absent.gcode"));
        }
        other => panic!("expected open failure, got {:?}", other),
    }
}

#[test]
fn test_empty_file_yields_no_commands() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let commands = read_commands_from_file(file.path(), ParserOptions::default()).unwrap();
    assert!(commands.is_empty());
}
