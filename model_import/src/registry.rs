//! Process-wide cache of type descriptors.
//!
//! Descriptors are built lazily on first use and shared for the life of the
//! process. The map lock only guards slot creation; each slot is a
//! [`OnceLock`], so concurrent first uses of a type run its build exactly
//! once. Builds themselves are serialised behind a reentrant lock so a
//! build that flattens another type can nest on the same thread, and a
//! per-thread set of in-progress types turns flatten cycles into
//! [`ImportError::UnresolvableType`] instead of a re-entered slot. Failed
//! builds are cached as well, so every caller observes the same error.

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock, OnceLock};

use parking_lot::{ReentrantMutex, RwLock};

use crate::{ImportError, ImportResult, Importable, TypeDescriptor};

type Entry = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceLock<Entry>>;
type Built<T> = ImportResult<Arc<TypeDescriptor<T>>>;

static REGISTRY: LazyLock<RwLock<HashMap<TypeId, Slot>>> = LazyLock::new(RwLock::default);

// Held for the duration of every build. Reentrant so nested flatten builds
// on the building thread do not wait on themselves.
static BUILD_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(|| ReentrantMutex::new(()));

thread_local! {
    static BUILDING: RefCell<HashSet<TypeId>> = RefCell::new(HashSet::new());
}

/// Removes a type from the in-progress set when its build ends, panics
/// included.
struct BuildingGuard(TypeId);

impl BuildingGuard {
    /// `None` when `id` is already being built on this thread.
    fn enter(id: TypeId) -> Option<Self> {
        // Build the guard only on insertion; dropping a spare one would
        // clear the outer build's entry.
        if BUILDING.with_borrow_mut(|building| building.insert(id)) {
            Some(Self(id))
        } else {
            None
        }
    }
}

impl Drop for BuildingGuard {
    fn drop(&mut self) {
        BUILDING.with_borrow_mut(|building| building.remove(&self.0));
    }
}

/// Fetch the descriptor for `T`, building it on first use.
pub(crate) fn descriptor<T: Importable>() -> Built<T> {
    let id = TypeId::of::<T>();
    let slot = slot_for(id);
    if let Some(entry) = slot.get() {
        return downcast::<T>(entry);
    }
    let _build_lock = BUILD_LOCK.lock();
    let Some(_building) = BuildingGuard::enter(id) else {
        tracing::warn!(type_name = type_name::<T>(), "flatten cycle detected");
        return Err(Arc::new(ImportError::unresolvable(
            type_name::<T>(),
            ["flatten cycle detected"],
        )));
    };
    downcast::<T>(slot.get_or_init(|| -> Entry { Arc::new(build::<T>()) }))
}

fn downcast<T: Importable>(entry: &Entry) -> Built<T> {
    entry.downcast_ref::<Built<T>>().cloned().unwrap_or_else(|| {
        Err(Arc::new(ImportError::unresolvable(
            type_name::<T>(),
            ["registry entry holds a descriptor for another type"],
        )))
    })
}

fn slot_for(id: TypeId) -> Slot {
    if let Some(slot) = REGISTRY.read().get(&id) {
        return Arc::clone(slot);
    }
    Arc::clone(REGISTRY.write().entry(id).or_default())
}

fn build<T: Importable>() -> Built<T> {
    let name = type_name::<T>();
    tracing::trace!(type_name = name, "building import descriptor");
    T::describe()
        .build()
        .map(Arc::new)
        .inspect_err(|err| tracing::warn!(type_name = name, %err, "import descriptor rejected"))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry failures"
)]
mod tests {
    //! Unit tests for descriptor caching.

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::descriptor;
    use crate::{DescriptorBuilder, ImportError, ImportHooks, Importable, Property};

    static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Default)]
    struct Counted {
        value: u32,
    }

    impl ImportHooks for Counted {}

    impl Importable for Counted {
        fn describe() -> DescriptorBuilder<Self> {
            COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
            DescriptorBuilder::new().property(Property::new("value", |c: &mut Self| &mut c.value))
        }
    }

    #[derive(Debug, Default)]
    struct Hollow;

    impl ImportHooks for Hollow {}

    impl Importable for Hollow {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new()
        }
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let handles: Vec<_> = (0..8).map(|_| thread::spawn(descriptor::<Counted>)).collect();
        let built: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("descriptor thread panicked"))
            .collect();
        assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
        let first = built
            .first()
            .and_then(|result| result.as_ref().ok())
            .expect("descriptor builds");
        for result in &built {
            let other = result.as_ref().expect("descriptor builds");
            assert!(Arc::ptr_eq(first, other));
        }
    }

    #[test]
    fn failed_builds_are_cached() {
        let first = descriptor::<Hollow>().expect_err("empty type is rejected");
        let second = descriptor::<Hollow>().expect_err("empty type is rejected");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(matches!(&*first, ImportError::UnresolvableType { .. }));
    }
}
