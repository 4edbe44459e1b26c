// ==========================================
// profile 上下文切换并发测试
// ==========================================
// 测试目标: 上下文切换与读取并发时，读取只会看到切换前或切换后的完整状态
// ==========================================

use emu_settings::settings::{ReadScope, Scope, Setting};
use emu_settings::store::{MemoryStore, ProfileId};
use std::sync::atomic::{AtomicBool, Ordering};

const GLOBAL_VALUE: i32 = 120;
const OVERRIDE_VALUE: i32 = 60;

#[test]
fn test_reads_during_context_switch_are_never_torn() {
    let store = MemoryStore::with_catalog();
    let profile = ProfileId::new("0100000000010000");

    let mut speed = Setting::<i32>::new("speed_limit");
    speed.set(&store, GLOBAL_VALUE).expect("set global");
    store.load_profile(profile.clone()).expect("load profile");
    speed.set(&store, OVERRIDE_VALUE).expect("set override");
    assert_eq!(speed.scope(), Scope::PerProfile);

    let speed = &speed;
    let store = &store;
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        let switcher = s.spawn(|| {
            for _ in 0..2_000 {
                store.unload_profile().expect("unload");
                store.load_profile(profile.clone()).expect("load");
            }
            done.store(true, Ordering::SeqCst);
        });

        let reader = s.spawn(|| {
            let mut reads = 0usize;
            while !done.load(Ordering::SeqCst) || reads < 100 {
                let value = speed.get(store, ReadScope::AsConfigured).expect("get");
                assert!(
                    value == GLOBAL_VALUE || value == OVERRIDE_VALUE,
                    "read observed an unexpected value: {}",
                    value
                );
                reads += 1;
            }
            reads
        });

        switcher.join().expect("switcher thread");
        let reads = reader.join().expect("reader thread");
        assert!(reads >= 100);
    });

    // 切换结束后停留在 profile 上下文
    assert_eq!(
        speed.get(store, ReadScope::AsConfigured).expect("get"),
        OVERRIDE_VALUE
    );
    assert_eq!(
        speed.get(store, ReadScope::ForceGlobal).expect("get"),
        GLOBAL_VALUE
    );
}
