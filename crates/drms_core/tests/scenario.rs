//! End-to-end walk through the key bindings against a recording backend.

use std::cell::RefCell;
use std::rc::Rc;

use drms_core::{
    Action, Demo, Extent, ModeState, MultisampleMode, Outcome, ResolutionDivisor, SampleLayout,
    TargetBackend, TargetDesc, TargetError,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Create(u32, TargetDesc),
    Destroy(u32),
}

/// Shared log so the test can inspect it after `Demo` took ownership of the
/// backend.
#[derive(Default, Clone)]
struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    fn live(&self) -> Vec<u32> {
        let mut live = Vec::new();
        for event in self.0.borrow().iter() {
            match event {
                Event::Create(id, _) => live.push(*id),
                Event::Destroy(id) => live.retain(|l| l != id),
            }
        }
        live
    }

    fn last_created(&self) -> Option<TargetDesc> {
        self.0.borrow().iter().rev().find_map(|e| match e {
            Event::Create(_, desc) => Some(*desc),
            Event::Destroy(_) => None,
        })
    }
}

struct RecordingBackend {
    journal: Journal,
    next_id: u32,
}

impl TargetBackend for RecordingBackend {
    type Target = u32;

    fn create_target(&mut self, desc: &TargetDesc) -> Result<u32, TargetError> {
        self.next_id += 1;
        self.journal.0.borrow_mut().push(Event::Create(self.next_id, *desc));
        Ok(self.next_id)
    }

    fn destroy_target(&mut self, target: u32) {
        self.journal.0.borrow_mut().push(Event::Destroy(target));
    }

    fn query_sample_layout(&mut self, _sample_count: u32) -> Result<SampleLayout, TargetError> {
        Ok(SampleLayout::STANDARD_4X)
    }
}

fn demo(window: Extent) -> (Demo<RecordingBackend>, Journal) {
    let journal = Journal::default();
    let backend = RecordingBackend {
        journal: journal.clone(),
        next_id: 0,
    };
    let demo = Demo::new(window, backend).unwrap();
    (demo, journal)
}

fn shape(journal: &Journal) -> (u32, u32, u32) {
    let desc = journal.last_created().unwrap();
    (desc.extent.width, desc.extent.height, desc.sample_count)
}

#[test]
fn key_sequence_on_1024x600() {
    let (mut demo, journal) = demo(Extent::new(1024, 600));

    assert_eq!(demo.mode(), ModeState::new(MultisampleMode::None, ResolutionDivisor::Full));
    assert_eq!(shape(&journal), (1024, 600, 1));

    demo.apply(Action::CycleMultisample).unwrap();
    assert_eq!(demo.mode(), ModeState::new(MultisampleMode::Msaa4, ResolutionDivisor::Full));
    assert_eq!(shape(&journal), (1024, 600, 4));

    demo.apply(Action::CycleResolution).unwrap();
    assert_eq!(demo.mode(), ModeState::new(MultisampleMode::Msaa4, ResolutionDivisor::Half));
    assert_eq!(shape(&journal), (512, 300, 4));

    demo.apply(Action::ToggleDualResolution).unwrap();
    assert_eq!(demo.mode(), ModeState::new(MultisampleMode::Drms4, ResolutionDivisor::Half));
    assert_eq!(shape(&journal), (256, 150, 4));
    assert_eq!(demo.target_extent(), Extent::new(256, 150));
}

#[test]
fn previous_target_is_released_before_the_next_exists() {
    let (mut demo, journal) = demo(Extent::new(800, 600));
    let actions = [
        Action::CycleMultisample,
        Action::CycleMultisample,
        Action::CycleResolution,
        Action::ToggleDualResolution,
        Action::CycleResolution,
        Action::CycleMultisample,
    ];
    for action in actions {
        assert_eq!(demo.apply(action).unwrap(), Outcome::Reconfigured);
    }
    demo.resize(Extent::new(333, 77)).unwrap();

    let mut live = 0i32;
    for event in journal.events() {
        match event {
            Event::Create(..) => {
                assert_eq!(live, 0, "allocated while another target was live");
                live += 1;
            }
            Event::Destroy(_) => live -= 1,
        }
    }
    assert_eq!(journal.live().len(), 1);

    demo.shutdown();
    assert!(journal.live().is_empty());
}

#[test]
fn every_change_matches_recomputed_extent_and_sample_count() {
    let (mut demo, journal) = demo(Extent::new(1023, 599));
    for action in [
        Action::CycleResolution,
        Action::CycleMultisample,
        Action::CycleResolution,
        Action::ToggleDualResolution,
        Action::CycleMultisample,
        Action::CycleResolution,
    ] {
        demo.apply(action).unwrap();
        let desc = journal.last_created().unwrap();
        let mode = demo.mode();
        assert_eq!(desc.extent, drms_core::compute_extent(demo.window(), mode));
        assert_eq!(desc.sample_count == 4, mode.multisample != MultisampleMode::None);
    }
}

#[test]
fn dropping_the_demo_releases_the_target() {
    let (demo, journal) = demo(Extent::new(64, 64));
    drop(demo);
    assert!(journal.live().is_empty());
}

#[test]
fn resize_rebuilds_the_target_for_the_current_mode() {
    let (mut demo, journal) = demo(Extent::new(1024, 600));

    demo.apply(Action::ToggleDualResolution).unwrap();
    assert_eq!(demo.mode(), ModeState::new(MultisampleMode::Drms4, ResolutionDivisor::Full));
    demo.resize(Extent::new(333, 77)).unwrap();
    assert_eq!(shape(&journal), (166, 38, 4));
    assert_eq!(
        demo.targets().desc().map(|d| d.extent),
        Some(drms_core::compute_extent(Extent::new(333, 77), demo.mode()))
    );

    demo.apply(Action::CycleMultisample).unwrap();
    demo.apply(Action::CycleMultisample).unwrap();
    assert_eq!(demo.mode().multisample, MultisampleMode::Msaa4);
    demo.resize(Extent::new(640, 481)).unwrap();
    assert_eq!(shape(&journal), (640, 481, 4));
    assert_eq!(demo.target_extent(), Extent::new(640, 481));

    demo.apply(Action::CycleResolution).unwrap();
    demo.resize(Extent::new(999, 5)).unwrap();
    assert_eq!(shape(&journal), (499, 2, 4));
    assert_eq!(journal.live().len(), 1);
}
