use std::io::Cursor;

use disk_sched::report::write_report;
use disk_sched::scheduler::{Fifo, Look};
use disk_sched::simulation::{Simulation, Trace};
use disk_sched::workload::load_requests;

#[test]
fn fifo_services_requests_in_arrival_order() {
    let workload = "0 5\n0 10\n";
    let requests = load_requests(Cursor::new(workload)).unwrap();

    let mut scheduler = Fifo::new();
    let mut sim = Simulation::new(&mut scheduler, requests, Trace::default());
    sim.run();

    assert_eq!(sim.completed().len(), 2);
    assert_eq!(sim.total_movement(), 15);

    let mut out = String::new();
    write_report(&mut out, sim.completed(), sim.total_time(), sim.total_movement()).unwrap();
    assert!(out.contains("SUM:"));
}

/// §8 end-to-end scenario: head starts at track 0, requests for tracks
/// 5, 10, 3 arrive one per tick; LOOK should total 22 tracks of movement.
#[test]
fn look_scenario_totals_twenty_two_tracks_of_movement() {
    let workload = "0 5\n1 10\n2 3\n";
    let requests = load_requests(Cursor::new(workload)).unwrap();

    let mut scheduler = Look::new();
    let mut sim = Simulation::new(&mut scheduler, requests, Trace::default());
    sim.run();

    assert_eq!(sim.total_movement(), 22);
    assert_eq!(sim.completed().len(), 3);
}
