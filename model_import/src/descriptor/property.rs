//! Property declarations and their built form.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Coerce, Coercion, DateStrategy, ImportContext, ImportResult, SemanticType, normalize_key};

/// Custom conversion for a single property, replacing [`Coerce`].
///
/// Return [`Coercion::Skip`] (or `None.into()`) to leave the property unset.
pub type CoercionHook<F> = fn(&Value, &ImportContext<'_>) -> Coercion<F>;

pub(crate) type AssignFn<T> =
    dyn Fn(&mut T, &Value, &ImportContext<'_>) -> ImportResult<Coercion<()>> + Send + Sync;

pub(crate) type DateKeyHook = fn(&str) -> Option<DateStrategy>;

fn assign_fn<T, C>(assign: C) -> Arc<AssignFn<T>>
where
    C: Fn(&mut T, &Value, &ImportContext<'_>) -> ImportResult<Coercion<()>> + Send + Sync + 'static,
{
    Arc::new(assign)
}

/// Declaration of one importable property, consumed by
/// [`super::DescriptorBuilder::property`].
///
/// # Examples
///
/// ```
/// use model_import::{DateStrategy, Property};
///
/// #[derive(Default)]
/// struct Post {
///     published: Option<time::OffsetDateTime>,
/// }
///
/// let property = Property::new("published", |post: &mut Post| &mut post.published)
///     .key("published_at")
///     .date_strategy(DateStrategy::EpochSeconds);
/// # let _ = property;
/// ```
pub struct Property<T> {
    name: &'static str,
    keys: Vec<Cow<'static, str>>,
    semantic_type: SemanticType,
    date_strategy: Option<DateStrategy>,
    assign: Arc<AssignFn<T>>,
}

impl<T: 'static> Property<T> {
    /// Declare a property coerced through `F`'s [`Coerce`] implementation.
    ///
    /// `access` projects the instance onto the field that receives the value.
    #[must_use]
    pub fn new<F>(name: &'static str, access: fn(&mut T) -> &mut F) -> Self
    where
        F: Coerce + 'static,
    {
        let assign = assign_fn(move |target: &mut T, value, ctx| {
            Ok(F::coerce(value, ctx)?.map(|coerced| *access(target) = coerced))
        });
        Self {
            name,
            keys: Vec::new(),
            semantic_type: F::semantic_type(),
            date_strategy: None,
            assign,
        }
    }

    /// Declare a property converted by a custom `hook`.
    #[must_use]
    pub fn with_hook<F>(
        name: &'static str,
        access: fn(&mut T) -> &mut F,
        hook: CoercionHook<F>,
    ) -> Self
    where
        F: 'static,
    {
        let assign = assign_fn(move |target: &mut T, value, ctx| {
            Ok(hook(value, ctx).map(|coerced| *access(target) = coerced))
        });
        Self {
            name,
            keys: Vec::new(),
            semantic_type: SemanticType::Custom,
            date_strategy: None,
            assign,
        }
    }
}

impl<T> Property<T> {
    /// Add a candidate JSON key. Without any, the property name is used.
    #[must_use]
    pub fn key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Parse dates for this property with `strategy`.
    #[must_use]
    pub fn date_strategy(mut self, strategy: DateStrategy) -> Self {
        self.date_strategy = Some(strategy);
        self
    }

    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn declared_date_strategy(&self) -> Option<&DateStrategy> {
        self.date_strategy.as_ref()
    }

    pub(crate) fn into_descriptor(self, date_hook: DateKeyHook) -> PropertyDescriptor<T> {
        let keys = if self.keys.is_empty() {
            vec![Cow::Borrowed(self.name)]
        } else {
            self.keys
        };
        let normalized_keys = keys.iter().map(|key| normalize_key(key)).collect();
        PropertyDescriptor {
            name: Cow::Borrowed(self.name),
            keys,
            normalized_keys,
            semantic_type: self.semantic_type,
            date_strategy: self.date_strategy,
            date_hooks: vec![date_hook],
            assign: self.assign,
        }
    }
}

/// A property as recorded in a built [`super::TypeDescriptor`].
pub struct PropertyDescriptor<T> {
    name: Cow<'static, str>,
    keys: Vec<Cow<'static, str>>,
    normalized_keys: Vec<String>,
    semantic_type: SemanticType,
    date_strategy: Option<DateStrategy>,
    /// Per-key date hooks, outermost owning type first.
    date_hooks: Vec<DateKeyHook>,
    assign: Arc<AssignFn<T>>,
}

impl<T> PropertyDescriptor<T> {
    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate JSON keys in lookup order.
    #[must_use]
    pub fn keys(&self) -> &[Cow<'static, str>] {
        &self.keys
    }

    /// Declared semantic type.
    #[must_use]
    pub const fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    /// Date strategy declared on the property itself.
    #[must_use]
    pub const fn date_strategy(&self) -> Option<&DateStrategy> {
        self.date_strategy.as_ref()
    }

    pub(crate) fn normalized_keys(&self) -> &[String] {
        &self.normalized_keys
    }

    /// Strategy for a matched `key`: the property's own, then the first
    /// owning type whose [`crate::ImportHooks::date_strategy_for_key`]
    /// answers with a valid strategy, starting from the outermost.
    pub(crate) fn effective_date_strategy(&self, key: &str) -> Option<Cow<'_, DateStrategy>> {
        self.date_strategy.as_ref().map(Cow::Borrowed).or_else(|| {
            self.date_hooks
                .iter()
                .filter_map(|hook| hook(key))
                .find(|strategy| match strategy.validate() {
                    Ok(()) => true,
                    Err(message) => {
                        tracing::warn!(
                            property = %self.name,
                            key,
                            %message,
                            "ignoring invalid date strategy from hook"
                        );
                        false
                    }
                })
                .map(Cow::Owned)
        })
    }

    pub(crate) fn assign(
        &self,
        target: &mut T,
        value: &Value,
        ctx: &ImportContext<'_>,
    ) -> ImportResult<Coercion<()>> {
        (self.assign)(target, value, ctx)
    }

    /// Add `key` ahead of the existing candidates unless already present.
    pub(crate) fn prepend_key(&mut self, key: &'static str) {
        if self.keys.iter().any(|existing| existing == key) {
            return;
        }
        self.keys.insert(0, Cow::Borrowed(key));
        self.normalized_keys.insert(0, normalize_key(key));
    }

    /// Re-target this property at an outer type through `access`, consulting
    /// `outer_hook` before the hooks already recorded.
    pub(crate) fn project<O>(
        &self,
        access: fn(&mut O) -> &mut T,
        outer_hook: DateKeyHook,
    ) -> PropertyDescriptor<O>
    where
        T: 'static,
        O: 'static,
    {
        let inner = Arc::clone(&self.assign);
        let assign = assign_fn(move |target: &mut O, value, ctx| inner(access(target), value, ctx));
        PropertyDescriptor {
            name: self.name.clone(),
            keys: self.keys.clone(),
            normalized_keys: self.normalized_keys.clone(),
            semantic_type: self.semantic_type.clone(),
            date_strategy: self.date_strategy.clone(),
            date_hooks: std::iter::once(outer_hook)
                .chain(self.date_hooks.iter().copied())
                .collect(),
            assign,
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("keys", &self.keys)
            .field("semantic_type", &self.semantic_type)
            .field("date_strategy", &self.date_strategy)
            .finish_non_exhaustive()
    }
}
