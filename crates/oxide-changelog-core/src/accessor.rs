//! Per-type property accessor tables and their process-wide cache.
//!
//! A type opts into materialization by implementing [`PropertyTarget`] and
//! declaring its properties on a [`PropertyTable`]. The table is turned into an
//! [`AccessorMap`] the first time the type is looked up and the map is kept for
//! the life of the cache.
//!
//! ```rust
//! use oxide_changelog_core::accessor::{AccessorCache, PropertyTable, PropertyTarget};
//!
//! #[derive(Default)]
//! struct Index {
//!     name: Option<String>,
//!     unique: bool,
//! }
//!
//! impl PropertyTarget for Index {
//!     fn describe(table: &mut PropertyTable<Self>) {
//!         table
//!             .property("name", |i: &Self| i.name.clone(), |i: &mut Self, v| i.name = v)
//!             .property("unique", |i: &Self| i.unique, |i: &mut Self, v| i.unique = v);
//!     }
//! }
//!
//! let cache = AccessorCache::new();
//! let map = cache.accessors::<Index>();
//! assert!(map.reader("unique").is_some());
//! assert!(map.writer("name").is_some());
//! ```

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::statement::{
    ColumnConfig, DeleteStatement, InsertSetStatement, InsertStatement, RawSqlStatement,
    UpdateStatement,
};
use crate::value::{FromValue, IntoValue, TypeRef, Value, ValueKind, ValueType};

/// Property name that is never exposed.
pub const EXCLUDED_PROPERTY: &str = "class";

/// Rejection raised by a constrained writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PropertyVeto {
    message: String,
}

impl PropertyVeto {
    /// Creates a veto with a user-facing message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The veto message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why invoking an accessor failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessFailure {
    /// The accessor was handed an object of another type.
    #[error("accessor expects a {expected} target")]
    WrongTarget {
        /// Type the accessor belongs to.
        expected: &'static str,
    },

    /// The argument has the wrong shape for the property.
    #[error("expected a {expected} argument, got {found}")]
    Mismatch {
        /// Declared kind of the property.
        expected: ValueKind,
        /// Runtime type of the rejected argument.
        found: &'static str,
    },

    /// A constrained writer refused the value.
    #[error(transparent)]
    Veto(#[from] PropertyVeto),
}

type ReadFn = Arc<dyn Fn(&dyn Any) -> Result<Value, AccessFailure> + Send + Sync>;
type WriteFn = Arc<dyn Fn(&mut dyn Any, Value) -> Result<(), AccessFailure> + Send + Sync>;

/// A resolved read capability.
#[derive(Clone)]
pub struct ReadAccessor {
    name: String,
    kind: ValueKind,
    read: ReadFn,
}

impl ReadAccessor {
    /// Qualified accessor name, used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the value this accessor returns.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Reads the property from `target`.
    ///
    /// # Errors
    ///
    /// Fails if `target` is not of the accessor's type.
    pub fn invoke(&self, target: &dyn Any) -> Result<Value, AccessFailure> {
        (self.read)(target)
    }
}

impl fmt::Debug for ReadAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A resolved write capability.
#[derive(Clone)]
pub struct WriteAccessor {
    name: String,
    kind: ValueKind,
    constrained: bool,
    write: WriteFn,
}

impl WriteAccessor {
    /// Qualified accessor name, used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the argument this accessor takes.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns true if the writer may veto values.
    #[must_use]
    pub const fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// Writes `value` into `target`.
    ///
    /// # Errors
    ///
    /// Fails if `target` has the wrong type, `value` has the wrong shape, or
    /// a constrained writer vetoes it.
    pub fn invoke(&self, target: &mut dyn Any, value: Value) -> Result<(), AccessFailure> {
        (self.write)(target, value)
    }
}

impl fmt::Debug for WriteAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("constrained", &self.constrained)
            .finish_non_exhaustive()
    }
}

/// Read and write capabilities of one property.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    read: Option<ReadAccessor>,
    write: Option<WriteAccessor>,
}

impl PropertyDescriptor {
    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read capability, if any.
    #[must_use]
    pub const fn reader(&self) -> Option<&ReadAccessor> {
        self.read.as_ref()
    }

    /// Write capability, if any.
    #[must_use]
    pub const fn writer(&self) -> Option<&WriteAccessor> {
        self.write.as_ref()
    }

    /// Returns true if the write path may veto values.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.write.as_ref().is_some_and(WriteAccessor::is_constrained)
    }
}

/// Accessor declarations collected from a [`PropertyTarget`].
///
/// `property` and `getter` are declared pairs and read-only properties.
/// `setter` and `checked_setter` are fluent writers, merged afterwards: they
/// create write-only properties or complete a read-only one of the same kind.
pub struct PropertyTable<T> {
    declared: Vec<PropertyDescriptor>,
    fluent: Vec<(String, WriteAccessor)>,
    _target: PhantomData<fn(&T)>,
}

impl<T: PropertyTarget> PropertyTable<T> {
    fn new() -> Self {
        Self {
            declared: Vec::new(),
            fluent: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Declares a readable and writable property.
    pub fn property<V, G, S>(&mut self, name: &str, get: G, set: S) -> &mut Self
    where
        V: ValueType + IntoValue + FromValue + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.declared.push(PropertyDescriptor {
            name: name.to_string(),
            read: Some(read_accessor(name, get)),
            write: Some(write_accessor(name, false, move |t: &mut T, v: V| {
                set(t, v);
                Ok(())
            })),
        });
        self
    }

    /// Declares a read-only property.
    pub fn getter<V, G>(&mut self, name: &str, get: G) -> &mut Self
    where
        V: ValueType + IntoValue + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.declared.push(PropertyDescriptor {
            name: name.to_string(),
            read: Some(read_accessor(name, get)),
            write: None,
        });
        self
    }

    /// Declares a fluent writer.
    pub fn setter<V, S>(&mut self, name: &str, set: S) -> &mut Self
    where
        V: ValueType + FromValue + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let writer = write_accessor(name, false, move |t: &mut T, v: V| {
            set(t, v);
            Ok(())
        });
        self.fluent.push((name.to_string(), writer));
        self
    }

    /// Declares a fluent writer that may veto values.
    pub fn checked_setter<V, S>(&mut self, name: &str, set: S) -> &mut Self
    where
        V: ValueType + FromValue + 'static,
        S: Fn(&mut T, V) -> Result<(), PropertyVeto> + Send + Sync + 'static,
    {
        let writer = write_accessor(name, true, set);
        self.fluent.push((name.to_string(), writer));
        self
    }
}

fn qualified_name<T: PropertyTarget>(property: &str) -> String {
    let type_name = T::type_path();
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    format!("{short}.{property}")
}

fn read_accessor<T, V, G>(name: &str, get: G) -> ReadAccessor
where
    T: PropertyTarget,
    V: ValueType + IntoValue + 'static,
    G: Fn(&T) -> V + Send + Sync + 'static,
{
    let read: ReadFn = Arc::new(move |target: &dyn Any| -> Result<Value, AccessFailure> {
        let target = target
            .downcast_ref::<T>()
            .ok_or(AccessFailure::WrongTarget {
                expected: std::any::type_name::<T>(),
            })?;
        Ok(get(target).into_value())
    });
    ReadAccessor {
        name: qualified_name::<T>(name),
        kind: V::value_kind(),
        read,
    }
}

fn write_accessor<T, V, S>(name: &str, constrained: bool, set: S) -> WriteAccessor
where
    T: PropertyTarget,
    V: ValueType + FromValue + 'static,
    S: Fn(&mut T, V) -> Result<(), PropertyVeto> + Send + Sync + 'static,
{
    let write: WriteFn = Arc::new(move |target: &mut dyn Any, value: Value| -> Result<(), AccessFailure> {
        let target = target
            .downcast_mut::<T>()
            .ok_or(AccessFailure::WrongTarget {
                expected: std::any::type_name::<T>(),
            })?;
        let value = V::from_value(value).map_err(|rejected| AccessFailure::Mismatch {
            expected: V::value_kind(),
            found: rejected.type_name(),
        })?;
        set(target, value).map_err(AccessFailure::from)
    });
    WriteAccessor {
        name: qualified_name::<T>(name),
        kind: V::value_kind(),
        constrained,
        write,
    }
}

/// A type whose properties can be materialized.
pub trait PropertyTarget: Any + Send + Sync {
    /// Declares the type's accessors.
    fn describe(table: &mut PropertyTable<Self>)
    where
        Self: Sized;

    /// Name the type is resolved by in type references.
    ///
    /// Defaults to [`std::any::type_name`]; public types should return their
    /// stable public path.
    fn type_path() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Object-safe view of a [`PropertyTarget`].
pub trait Materializable: Any + Send + Sync {
    /// Accessors of the concrete type, from `cache`.
    fn accessor_map(&self, cache: &AccessorCache) -> Arc<AccessorMap>;

    /// Full name of the concrete type.
    fn target_type_name(&self) -> &'static str;

    /// Upcasts for reading.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for writing.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: PropertyTarget> Materializable for T {
    fn accessor_map(&self, cache: &AccessorCache) -> Arc<AccessorMap> {
        cache.accessors::<T>()
    }

    fn target_type_name(&self) -> &'static str {
        T::type_path()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All accessors of one type, keyed by property name.
#[derive(Debug, Default)]
pub struct AccessorMap {
    type_name: &'static str,
    properties: BTreeMap<String, PropertyDescriptor>,
}

impl AccessorMap {
    fn discover<T: PropertyTarget>() -> Self {
        let mut table = PropertyTable::<T>::new();
        T::describe(&mut table);

        let mut properties = BTreeMap::new();
        for descriptor in table.declared {
            if descriptor.name == EXCLUDED_PROPERTY {
                continue;
            }
            if descriptor.read.is_some() || descriptor.write.is_some() {
                properties.insert(descriptor.name.clone(), descriptor);
            }
        }

        for (name, writer) in table.fluent {
            if name == EXCLUDED_PROPERTY {
                continue;
            }
            match properties.get_mut(&name) {
                None => {
                    properties.insert(
                        name.clone(),
                        PropertyDescriptor {
                            name,
                            read: None,
                            write: Some(writer),
                        },
                    );
                }
                Some(existing) => {
                    let same_kind = existing
                        .read
                        .as_ref()
                        .is_some_and(|reader| reader.kind == writer.kind);
                    if existing.write.is_none() && same_kind {
                        existing.write = Some(writer);
                    } else {
                        trace!(property = %name, "ignoring fluent writer");
                    }
                }
            }
        }

        Self {
            type_name: T::type_path(),
            properties,
        }
    }

    /// Full name of the type these accessors belong to.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Descriptor for a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(property)
    }

    /// Read capability for a property.
    #[must_use]
    pub fn reader(&self, property: &str) -> Option<&ReadAccessor> {
        self.get(property).and_then(PropertyDescriptor::reader)
    }

    /// Write capability for a property.
    #[must_use]
    pub fn writer(&self, property: &str) -> Option<&WriteAccessor> {
        self.get(property).and_then(PropertyDescriptor::writer)
    }

    /// Property names in lexical order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the type exposes no property.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

static GLOBAL_CACHE: LazyLock<AccessorCache> = LazyLock::new(AccessorCache::new);

/// Lazily filled, never invalidated cache of [`AccessorMap`]s.
///
/// Every cache starts out knowing the names of the built-in statement types,
/// so they resolve as type references before their accessors are built.
#[derive(Debug)]
pub struct AccessorCache {
    maps: DashMap<TypeId, Arc<AccessorMap>>,
    names: DashMap<&'static str, TypeId>,
    computations: AtomicU64,
}

impl Default for AccessorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessorCache {
    /// Creates a cache with no accessor map built yet.
    #[must_use]
    pub fn new() -> Self {
        let cache = Self {
            maps: DashMap::new(),
            names: DashMap::new(),
            computations: AtomicU64::new(0),
        };
        cache.register::<ColumnConfig>();
        cache.register::<InsertStatement>();
        cache.register::<InsertSetStatement>();
        cache.register::<UpdateStatement>();
        cache.register::<DeleteStatement>();
        cache.register::<RawSqlStatement>();
        cache
    }

    /// The process-wide cache.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_CACHE
    }

    /// Returns the accessors of `T`, building them on first use.
    pub fn accessors<T: PropertyTarget>(&self) -> Arc<AccessorMap> {
        let id = TypeId::of::<T>();
        if let Some(map) = self.maps.get(&id) {
            return Arc::clone(map.value());
        }

        let map = Arc::clone(
            self.maps
                .entry(id)
                .or_insert_with(|| {
                    self.computations.fetch_add(1, Ordering::Relaxed);
                    let map = AccessorMap::discover::<T>();
                    debug!(
                        target_type = map.type_name(),
                        properties = map.len(),
                        "computed property accessors"
                    );
                    Arc::new(map)
                })
                .value(),
        );
        self.register::<T>();
        map
    }

    /// Makes `T` resolvable by its [`PropertyTarget::type_path`] through
    /// [`AccessorCache::resolve_type`]. Accessors are still built lazily.
    pub fn register<T: PropertyTarget>(&self) {
        self.names.entry(T::type_path()).or_insert_with(TypeId::of::<T>);
    }

    /// Looks up a type registered with or seen by this cache by name.
    #[must_use]
    pub fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        self.names.contains_key(name).then(|| TypeRef {
            name: name.to_string(),
        })
    }

    /// How many accessor maps were built so far.
    #[must_use]
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Returns true if nothing was cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
