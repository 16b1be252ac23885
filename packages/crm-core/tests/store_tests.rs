//! Customer store integration tests.
//!
//! Exercises the store through its public API: id assignment, merge
//! semantics, and access from many threads at once.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use ntest::timeout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crm_core::{Customer, CustomerPatch, CustomerStore, NewCustomer, StoreError};

fn draft(name: &str, email: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        role: "Designer".to_string(),
        email: email.to_string(),
        phone: "555-0104".to_string(),
        ..Default::default()
    }
}

/// Insert then get yields the candidate plus its assigned id
#[test]
fn test_insert_get_round_trip() -> anyhow::Result<()> {
    let store = CustomerStore::seeded();
    let candidate = draft("Dave Lee", "dave.lee@example.com");

    let created = store.insert(candidate.clone())?;
    let fetched = store.get(created.id)?;

    assert_eq!(fetched, candidate.into_customer(created.id));
    Ok(())
}

/// N inserts grow the list by N, each id being count-before-insert + 1
#[test]
fn test_insert_only_history_ids() -> anyhow::Result<()> {
    let store = CustomerStore::seeded();
    for n in 0..10 {
        let before = store.len()?;
        let created = store.insert(draft(&format!("Customer {}", n), ""))?;
        assert_eq!(created.id as usize, before + 1);
    }
    assert_eq!(store.list()?.len(), 13);
    Ok(())
}

#[test]
fn test_delete_then_get_is_not_found() {
    let store = CustomerStore::seeded();
    store.delete(1).unwrap();
    assert_eq!(store.get(1), Err(StoreError::NotFound { id: 1 }));
    assert_eq!(store.delete(1), Err(StoreError::NotFound { id: 1 }));
}

#[test]
fn test_contacted_never_cleared() {
    let store = CustomerStore::seeded();
    assert!(store.get(2).unwrap().contacted);

    let patch = CustomerPatch {
        contacted: Some(false),
        role: Some("Lead Developer".to_string()),
        ..Default::default()
    };
    let updated = store.update(2, &patch).unwrap();
    assert!(updated.contacted);
    assert_eq!(updated.role, "Lead Developer");
}

/// Random operation sequences agree with a plain Vec model
#[test]
#[timeout(5000)]
fn test_random_operations_match_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let store = CustomerStore::seeded();
    let mut model: Vec<Customer> = store.list().unwrap();
    let mut next_id = 4;
    let mut issued: HashSet<u64> = model.iter().map(|c| c.id).collect();

    for step in 0..500 {
        let id = rng.gen_range(1..next_id + 2);
        match rng.gen_range(0..4) {
            0 => {
                let created = store
                    .insert(draft(&format!("Step {}", step), "step@example.com"))
                    .unwrap();
                assert_eq!(created.id, next_id);
                assert!(issued.insert(created.id), "id {} issued twice", created.id);
                model.push(created);
                next_id += 1;
            }
            1 => {
                let expected = model.iter().find(|c| c.id == id).cloned();
                assert_eq!(store.get(id).ok(), expected);
            }
            2 => {
                let patch = CustomerPatch {
                    email: Some(format!("{}@example.com", step)),
                    contacted: Some(rng.gen_bool(0.5)),
                    ..Default::default()
                };
                let expected = model.iter_mut().find(|c| c.id == id).map(|c| {
                    patch.merge_into(c);
                    c.clone()
                });
                assert_eq!(store.update(id, &patch).ok(), expected);
            }
            _ => {
                let expected = model
                    .iter()
                    .position(|c| c.id == id)
                    .map(|index| model.remove(index));
                assert_eq!(store.delete(id).ok(), expected);
            }
        }
        assert_eq!(store.list().unwrap(), model);
    }
}

#[test]
#[timeout(5000)]
fn test_concurrent_inserts_get_unique_ids() {
    let store = Arc::new(CustomerStore::new());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        store
                            .insert(draft(&format!("w{}-{}", worker, i), ""))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }
    assert_eq!(ids.len(), 800);
    assert_eq!(store.len().unwrap(), 800);
    assert_eq!(ids.iter().max(), Some(&800));
}
