//! The world can be handed to a dedicated simulation thread.
use cashrun::{MotionEvent, MotionWorld, WorldConfig};
use static_assertions::assert_impl_all;

assert_impl_all!(MotionWorld: Send, Sync, Clone);
assert_impl_all!(MotionEvent: Send, Sync, Copy);
assert_impl_all!(WorldConfig: Send, Sync, Copy);

#[test]
fn world_ticks_on_another_thread() {
    let world = MotionWorld::new(WorldConfig::default()).expect("valid config");
    let handle = std::thread::spawn(move || {
        let mut w = world;
        w.tick();
        w.tick_count()
    });
    assert_eq!(handle.join().expect("thread finished"), 1);
}
