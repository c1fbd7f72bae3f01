use port_sweep_rs::config::{PortSpec, ScanConfiguration};
use port_sweep_rs::error::ScanError;
use port_sweep_rs::ports::{enumerate, parse_port_list};

fn ports(cfg: &ScanConfiguration) -> Vec<u16> {
    enumerate(cfg).expect("enumerate ok").map(|t| t.port).collect()
}

#[test]
fn explicit_list_in_input_order() {
    let spec = parse_port_list("80,443,8080").expect("parse ok");
    let cfg = ScanConfiguration::new("127.0.0.1", spec);
    assert_eq!(ports(&cfg), vec![80, 443, 8080]);
}

#[test]
fn closed_range_and_inverted_range() {
    let cfg = ScanConfiguration::new("127.0.0.1", PortSpec::Range { start: 5000, end: 5002 });
    assert_eq!(ports(&cfg), vec![5000, 5001, 5002]);

    let cfg = ScanConfiguration::new("127.0.0.1", PortSpec::Range { start: 10, end: 5 });
    assert!(ports(&cfg).is_empty());
}

#[test]
fn every_target_has_the_configured_host() {
    let cfg = ScanConfiguration::new("scanme.example", PortSpec::Range { start: 1, end: 3 });
    assert!(enumerate(&cfg).unwrap().all(|t| t.host == "scanme.example"));
}

#[test]
fn invalid_port_rejected() {
    assert!(matches!(
        parse_port_list("22,abc"),
        Err(ScanError::InvalidPortSpec { .. })
    ));
    assert!(parse_port_list("65536").is_err());
}

#[test]
fn invalid_config_fails_enumeration() {
    let cfg = ScanConfiguration::new("127.0.0.1", PortSpec::List(vec![80])).with_workers(0);
    assert!(matches!(enumerate(&cfg), Err(ScanError::InvalidConfig(_))));
}
