use std::fs;

use devfleet::DeviceRegistry;
use devfleet::Diagnostic;
use devfleet::ErrorKind;
use devfleet::RecordError;
use tempfile::TempDir;

const DEVICES: &str = "\
SW-1,Apple Watch SE2,,27%
P-1,LinuxPC,,Linux Mint
P-2,ThinkPad T440
ED-1,Pi3,192.168.1.44,MD Ltd.Wifi-1
ED-2,Pi4,192.168.1.45,eduroam
ED-3,Pi4,192.168.1,MD Ltd.Wifi-1
X-9,Toaster,,
";

#[test]
fn test_load_good_and_malformed_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devices.txt");
    fs::write(&path, "SW-1,Watch1,,85%\nSW-2,Watch2\n").unwrap();

    let (registry, report) = DeviceRegistry::from_file(&path).unwrap();

    assert_eq!(registry.len(), 1);
    let watch = registry.get(1).unwrap();
    assert_eq!(watch.name(), "Watch1");
    assert_eq!(watch.as_smartwatch().unwrap().battery(), 85);

    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line_number, 2);
    assert_eq!(errors[0].line, "SW-2,Watch2");
    assert_eq!(errors[0].error.kind(), ErrorKind::Parse);
}

#[test]
fn test_missing_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.txt");

    let (registry, report) = DeviceRegistry::from_file(&path).unwrap();

    assert!(registry.is_empty());
    assert!(!report.has_errors());
    assert_eq!(report.warnings().count(), 1);
    assert!(report.diagnostics[0].is_warning());
    assert!(report.format().contains("does not exist"));
}

#[test]
fn test_directory_is_a_load_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(DeviceRegistry::from_file(temp_dir.path()).is_err());
}

#[test]
fn test_listing_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devices.txt");
    fs::write(&path, DEVICES).unwrap();

    let (mut registry, report) = DeviceRegistry::from_file(&path).unwrap();
    assert_eq!(report.errors().count(), 2);

    registry.turn_on(1).unwrap();
    assert!(registry.turn_on(2).is_err());

    let mut out = Vec::new();
    registry.show_all(&mut out).unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
    ID: 1, Name: Apple Watch SE2, Status: ON, Battery: 17%
    ID: 1, Name: LinuxPC, Status: OFF, OS: Linux Mint
    ID: 2, Name: ThinkPad T440, Status: OFF, OS: Not Installed
    ID: 1, Name: Pi3, Status: OFF, IP: 192.168.1.44, Network: MD Ltd.Wifi-1
    ID: 2, Name: Pi4, Status: OFF, IP: 192.168.1.45, Network: eduroam
    ");
}

#[test]
fn test_report_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devices.txt");
    fs::write(&path, DEVICES).unwrap();

    let (_, report) = DeviceRegistry::from_file(&path).unwrap();
    let rendered = report.format();

    assert!(rendered.contains("devices.txt"));
    assert!(rendered.contains("Skipped line 6: Invalid IP address '192.168.1'"));
    assert!(rendered.contains("Skipped line 7: Unrecognized device type 'X'"));
    assert!(rendered.contains("this line was not loaded"));

    let kinds: Vec<_> = report
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Error(e) => Some(&e.error),
            Diagnostic::Warning(_) => None,
        })
        .collect();
    assert!(matches!(kinds[0], RecordError::Device(_)));
    assert_eq!(kinds[1], &RecordError::UnknownPrefix("X".to_string()));
}

#[test]
fn test_one_bad_line_never_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devices.txt");
    fs::write(
        &path,
        "garbage\nSW-1,Watch,,150%\nSW-2,Watch,,abc\n,,,\nP-3,Survivor,,Debian\n",
    )
    .unwrap();

    let (registry, report) = DeviceRegistry::from_file(&path).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.list(), vec!["ID: 3, Name: Survivor, Status: OFF, OS: Debian"]);
    assert_eq!(report.errors().count(), 4);
}
