use switchsim::{
    driver::{self, append_record},
    time::Slot,
    Config, Discipline, Format, Record,
};

fn conserved(record: &Record) -> bool {
    record.generated == record.transmitted + record.dropped() + record.in_flight
}

// Two saturated ports, one-packet buffers, one slot: packets heading to
// different outputs both get through; packets heading to the same output
// leave one winner and one blocked head of line.
#[test]
fn inq_two_port_single_slot() -> anyhow::Result<()> {
    let mut seen_clash = false;
    let mut seen_split = false;
    for seed in 0..64 {
        let cfg = Config::builder()
            .num_ports(2)
            .buffer_size(1)
            .packet_gen_prob(1.0)
            .queue_type(Discipline::Inq)
            .max_time_slots(Slot::ONE)
            .seed(seed)
            .build();
        let record = driver::run(&cfg)?;
        assert_eq!(record.generated, 2);
        assert_eq!(record.dropped(), 0);
        match record.transmitted {
            2 => {
                seen_split = true;
                assert_eq!(record.in_flight, 0);
            }
            1 => {
                seen_clash = true;
                assert_eq!(record.in_flight, 1);
            }
            n => panic!("unexpected transmit count {n}"),
        }
        assert_eq!(record.avg_packet_delay, Some(0.0));
    }
    assert!(seen_clash && seen_split);
    Ok(())
}

#[test]
fn same_seed_same_record() -> anyhow::Result<()> {
    for queue_type in [Discipline::Inq, Discipline::Kouq, Discipline::Islip] {
        let cfg = Config::builder()
            .queue_type(queue_type)
            .max_time_slots(Slot::new(5_000))
            .seed(2024)
            .build();
        assert_eq!(driver::run(&cfg)?, driver::run(&cfg)?);
    }
    Ok(())
}

#[test]
fn different_seed_different_record() -> anyhow::Result<()> {
    let a = driver::run(&Config::builder().seed(1).build())?;
    let b = driver::run(&Config::builder().seed(2).build())?;
    assert_ne!(a, b);
    Ok(())
}

#[test]
fn every_packet_is_accounted_for() -> anyhow::Result<()> {
    for queue_type in [Discipline::Inq, Discipline::Kouq, Discipline::Islip] {
        for prob in [0.0, 0.3, 0.7, 1.0] {
            for buffer_size in [0, 1, 4] {
                let cfg = Config::builder()
                    .num_ports(6)
                    .buffer_size(buffer_size)
                    .packet_gen_prob(prob)
                    .queue_type(queue_type)
                    .max_time_slots(Slot::new(2_000))
                    .seed(7)
                    .build();
                let record = driver::run(&cfg)?;
                assert!(conserved(&record), "{cfg:?} -> {record:?}");
                if let Some(util) = record.avg_link_utilization {
                    assert!((0.0..=1.0).contains(&util));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn zero_knockout_limit_drops_everything() -> anyhow::Result<()> {
    let cfg = Config::builder()
        .num_ports(4)
        .packet_gen_prob(1.0)
        .queue_type(Discipline::Kouq)
        .knockout_fraction(0.0)
        .max_time_slots(Slot::new(100))
        .build();
    let record = driver::run(&cfg)?;
    assert_eq!(record.transmitted, 0);
    assert_eq!(record.avg_packet_delay, None);
    assert_eq!(record.knockout_drops, record.generated - record.in_flight);
    assert!(record.knockout_drops > 0);
    Ok(())
}

#[test]
fn full_knockout_limit_never_knocks_out() -> anyhow::Result<()> {
    let cfg = Config::builder()
        .packet_gen_prob(0.9)
        .queue_type(Discipline::Kouq)
        .knockout_fraction(1.0)
        .max_time_slots(Slot::new(2_000))
        .build();
    let record = driver::run(&cfg)?;
    assert_eq!(record.knockout_drops, 0);
    Ok(())
}

#[test]
fn islip_with_unbounded_input_never_drops() -> anyhow::Result<()> {
    let cfg = Config::builder()
        .packet_gen_prob(1.0)
        .queue_type(Discipline::Islip)
        .unbounded_input(true)
        .max_time_slots(Slot::new(1_000))
        .build();
    let record = driver::run(&cfg)?;
    assert_eq!(record.dropped(), 0);
    assert_eq!(record.drop_probability, Some(0.0));
    assert!(conserved(&record));
    Ok(())
}

#[test]
fn light_load_utilization_tracks_load() -> anyhow::Result<()> {
    let cfg = Config::builder()
        .packet_gen_prob(0.2)
        .queue_type(Discipline::Islip)
        .max_time_slots(Slot::new(20_000))
        .seed(5)
        .build();
    let record = driver::run(&cfg)?;
    let util = record.avg_link_utilization.unwrap();
    assert!((0.17..0.23).contains(&util), "utilization {util}");
    Ok(())
}

#[test]
fn no_traffic_reports_na_delay() -> anyhow::Result<()> {
    let cfg = Config::builder()
        .packet_gen_prob(0.0)
        .max_time_slots(Slot::new(100))
        .build();
    let record = driver::run(&cfg)?;
    assert_eq!(record.avg_packet_delay, None);
    assert_eq!(record.avg_link_utilization, Some(0.0));
    assert!(record.to_string().contains("N/A"));
    Ok(())
}

#[test]
fn invalid_config_fails_before_running() {
    let cfg = Config::builder().num_ports(0).build();
    assert!(driver::run(&cfg).is_err());
}

#[test]
fn append_to_sink() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("summary.tsv");
    let cfg = Config::builder().max_time_slots(Slot::new(100)).build();
    let record = driver::run(&cfg)?;
    append_record(&record, Format::Tsv, &path)?;
    append_record(&record, Format::Json, &path)?;
    let contents = std::fs::read_to_string(&path)?;
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("8\t0.5\tKOUQ\t"));
    let back: Record = serde_json::from_str(lines[1])?;
    assert_eq!(back.queue_type, Discipline::Kouq);
    assert_eq!(back.generated, record.generated);
    assert_eq!(back.in_flight, record.in_flight);
    Ok(())
}

#[test]
fn config_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("switch.json");
    std::fs::write(&path, r#"{ "num_ports": 16, "queue_type": "INQ", "seed": 3 }"#)?;
    let cfg = driver::read_config(&path)?;
    assert_eq!(cfg.num_ports, 16);
    assert_eq!(cfg.queue_type, Discipline::Inq);
    assert_eq!(cfg.seed, 3);
    assert_eq!(cfg.knockout_fraction, 0.6);
    Ok(())
}
