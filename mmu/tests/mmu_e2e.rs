use std::io::{BufReader, Cursor};

use mmu::input::load;
use mmu::pager::Fifo;
use mmu::simulation::Simulation;
use sim_common::RandomStream;

#[test]
fn page_fault_maps_then_exit_unmaps() {
    let data = "1\n1\n0 1 0 0\nc 0\nr 0\nw 1\ne 0\n";
    let workload = load(Cursor::new(data)).unwrap();

    let mut rng = RandomStream::from_values(vec![0]);
    let mut pager = Fifo::new();
    let mut sim = Simulation::new(&mut pager, &mut rng, 4, workload.processes, true);
    sim.run(&workload.instructions);

    assert_eq!(sim.processes()[0].cost.maps, 2);
    assert_eq!(sim.processes()[0].cost.unmaps, 2);
    assert!(sim.frames().iter().all(|f| !f.mapped));
}

#[test]
fn access_outside_any_vma_is_a_segv() {
    let data = "1\n0\nc 0\nr 5\n";
    let workload = load(Cursor::new(data)).unwrap();

    let mut rng = RandomStream::from_values(vec![0]);
    let mut pager = Fifo::new();
    let mut sim = Simulation::new(&mut pager, &mut rng, 4, workload.processes, false);
    sim.run(&workload.instructions);

    assert_eq!(sim.processes()[0].cost.segv, 1);
    assert!(!sim.processes()[0].page_table[5].present);
}

#[test]
fn frame_reuse_triggers_unmap_when_frames_are_scarce() {
    let data = "1\n1\n0 3 0 0\nc 0\nr 0\nr 1\nr 2\nr 3\n";
    let workload = load(Cursor::new(data)).unwrap();

    let mut rng = RandomStream::from_values(vec![0]);
    let mut pager = Fifo::new();
    let mut sim = Simulation::new(&mut pager, &mut rng, 2, workload.processes, false);
    sim.run(&workload.instructions);

    assert_eq!(sim.processes()[0].cost.maps, 4);
    assert!(sim.processes()[0].cost.unmaps >= 2);
}

#[test]
fn workload_and_rfile_load_from_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    std::fs::write(&input_path, "1\n1\n0 1 0 0\nc 0\nr 0\n").unwrap();
    let rfile_path = dir.path().join("rfile");
    std::fs::write(&rfile_path, "1\n0\n").unwrap();

    let workload = load(BufReader::new(std::fs::File::open(&input_path).unwrap())).unwrap();
    let mut rng = RandomStream::load(&rfile_path).unwrap();
    let mut pager = Fifo::new();
    let mut sim = Simulation::new(&mut pager, &mut rng, 4, workload.processes, false);
    sim.run(&workload.instructions);

    assert_eq!(sim.processes()[0].cost.maps, 1);
}
