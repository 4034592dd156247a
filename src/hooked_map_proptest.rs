#![cfg(test)]

// Property tests for HookedMap kept inside the crate, next to the
// implementation they exercise.

use crate::hooked_map::HookedMap;
use crate::hooks::Hooks;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Delete(usize),
    Contains(usize),
    Shift,
    Merge(Vec<(usize, i32)>),
    DeleteBelow(i32),
    KeepBelow(i32),
    Clear,
}

type Model = Vec<(String, i32)>;

fn model_set(model: &mut Model, key: &str, value: i32) {
    // Re-setting keeps the original position, matching IndexMap::insert.
    if let Some(slot) = model.iter_mut().find(|(k, _)| k == key) {
        slot.1 = value;
    } else {
        model.push((key.to_string(), value));
    }
}

fn model_delete(model: &mut Model, key: &str) -> Option<i32> {
    model
        .iter()
        .position(|(k, _)| k == key)
        .map(|i| model.remove(i).1)
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{1,4}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs.clone());
        let pair = (proptest::sample::select(idxs), any::<i32>());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            6 => idx.clone().prop_map(OpI::Get),
            4 => idx.clone().prop_map(OpI::Delete),
            3 => idx.clone().prop_map(OpI::Contains),
            2 => Just(OpI::Shift),
            2 => proptest::collection::vec(pair, 0..6).prop_map(OpI::Merge),
            2 => any::<i32>().prop_map(OpI::DeleteBelow),
            2 => any::<i32>().prop_map(OpI::KeepBelow),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_op<H: Hooks<String, i32>>(
    sut: &HookedMap<String, i32, (), H>,
    model: &mut Model,
    pool: &[String],
    op: OpI,
    quiet: bool,
) {
    match op {
        OpI::Set(i, v) => {
            let k = pool[i].clone();
            let out = if quiet {
                sut.set_without_hooks(k.clone(), v)
            } else {
                sut.set(k.clone(), v)
            };
            assert_eq!(out, v);
            model_set(model, &k, v);
        }
        OpI::Get(i) => {
            let k = &pool[i];
            let out = if quiet {
                sut.get_without_hooks(k)
            } else {
                sut.get(k)
            };
            let expect = model.iter().find(|(mk, _)| mk == k).map(|(_, mv)| *mv);
            assert_eq!(out, expect);
        }
        OpI::Delete(i) => {
            let k = &pool[i];
            let out = if quiet {
                sut.delete_without_hooks(k)
            } else {
                sut.delete(k)
            };
            assert_eq!(out, model_delete(model, k));
        }
        OpI::Contains(i) => {
            let k = &pool[i];
            let expect = model.iter().any(|(mk, _)| mk == k);
            assert_eq!(sut.contains_key(k), expect);
        }
        OpI::Shift => {
            let out = if quiet {
                sut.shift_without_hooks()
            } else {
                sut.shift()
            };
            let expect = if model.is_empty() {
                None
            } else {
                let (k, v) = model.remove(0);
                Some((k, Some(v)))
            };
            assert_eq!(out, expect);
        }
        OpI::Merge(pairs) => {
            let entries: Vec<(String, i32)> = pairs
                .into_iter()
                .map(|(i, v)| (pool[i].clone(), v))
                .collect();
            for (k, v) in &entries {
                model_set(model, k, *v);
            }
            if quiet {
                sut.merge_without_hooks(entries);
            } else {
                sut.merge(entries);
            }
        }
        OpI::DeleteBelow(t) => {
            if quiet {
                sut.delete_if_without_hooks(|_, v| *v < t);
            } else {
                sut.delete_if(|_, v| *v < t);
            }
            model.retain(|(_, v)| !(*v < t));
        }
        OpI::KeepBelow(t) => {
            if quiet {
                sut.keep_if_without_hooks(|_, v| *v < t);
            } else {
                sut.keep_if(|_, v| *v < t);
            }
            model.retain(|(_, v)| *v < t);
        }
        OpI::Clear => {
            if quiet {
                sut.clear_without_hooks();
            } else {
                sut.clear();
            }
            model.clear();
        }
    }
}

// Property: state-machine equivalence against an insertion-ordered model.
// Invariants exercised across random operation sequences:
// - set returns its input and get/delete/shift agree with the model,
//   including order-preserving re-set and order-compacting removal.
// - shift removes the first entry in insertion order.
// - filter and clear operations are snapshot-driven removals.
// - entries()/len/is_empty parity with the model after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut: HookedMap<String, i32> = HookedMap::new();
        let mut model: Model = Vec::new();

        for op in ops {
            run_op(&sut, &mut model, &pool, op, false);

            prop_assert_eq!(sut.entries(), model.clone());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Hook set that fails loudly on any invocation; proves the suppressed
// entry points never reach a hook.
struct TrippedHooks;

impl Hooks<String, i32> for TrippedHooks {
    fn pre_set(&self, _map: &HookedMap<String, i32, (), Self>, key: &String, _value: i32) -> i32 {
        panic!("pre_set invoked for {key}");
    }
    fn post_set(&self, _map: &HookedMap<String, i32, (), Self>, key: &String, _stored: i32) -> i32 {
        panic!("post_set invoked for {key}");
    }
    fn pre_get(&self, _map: &HookedMap<String, i32, (), Self>, key: &String) -> bool {
        panic!("pre_get invoked for {key}");
    }
    fn post_get(
        &self,
        _map: &HookedMap<String, i32, (), Self>,
        key: &String,
        _value: Option<i32>,
    ) -> Option<i32> {
        panic!("post_get invoked for {key}");
    }
    fn pre_delete(&self, _map: &HookedMap<String, i32, (), Self>, key: &String) -> bool {
        panic!("pre_delete invoked for {key}");
    }
    fn post_delete(
        &self,
        _map: &HookedMap<String, i32, (), Self>,
        key: &String,
        _removed: Option<i32>,
    ) -> Option<i32> {
        panic!("post_delete invoked for {key}");
    }
}

// Property: the same state machine driven exclusively through the
// *_without_hooks variants behaves like the raw model even when every hook
// would panic if invoked. Verifies both suppression coverage and that the
// suppressed operations keep plain map semantics.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_suppressed((pool, ops) in arb_scenario()) {
        let sut: HookedMap<String, i32, (), TrippedHooks> =
            HookedMap::with_hooks(TrippedHooks);
        let mut model: Model = Vec::new();

        for op in ops {
            run_op(&sut, &mut model, &pool, op, true);

            prop_assert_eq!(sut.entries(), model.clone());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}
