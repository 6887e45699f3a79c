//! Helper registry.
//!
//! A [`FuncMap`] maps helper names to callables taking and returning dynamic
//! [`Value`]s. It is assembled by [`FuncMapBuilder`] from the built-in helpers
//! and any number of caller supplied maps.
//!
//! Merging rules:
//! - `None` entries in a caller map are ignored;
//! - by default the leftmost definition of a name wins, and the built-ins
//!   come first;
//! - with [`FuncMapBuilder::rightmost_overrides`] the last definition wins.

pub mod builtins;
pub mod value;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};

pub use value::{Args, CallError, Value};

/// A registered helper
pub type Helper = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// Caller supplied helpers; `None` entries are skipped when merging
pub type HelperMap = BTreeMap<String, Option<Helper>>;

/// Time source for the `now` and `started` helpers
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Wrap a closure as a [`Helper`]
pub fn helper<F>(f: F) -> Helper
where
    F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Name to helper lookup table
#[derive(Clone, Default)]
pub struct FuncMap {
    helpers: BTreeMap<String, Helper>,
}

impl FuncMap {
    /// The built-in helpers with the system clock
    pub fn new() -> Self {
        FuncMapBuilder::new().build()
    }

    pub fn builder() -> FuncMapBuilder {
        FuncMapBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Call a helper by name
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, CallError> {
        let helper = self
            .helpers
            .get(name)
            .ok_or_else(|| CallError::Unknown(name.to_string()))?;
        log::trace!("calling helper {} with {} arguments", name, args.len());
        helper(args)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    /// The table as a mergeable map, sharing the helper instances
    pub fn to_helper_map(&self) -> HelperMap {
        self.helpers
            .iter()
            .map(|(name, helper)| (name.clone(), Some(Arc::clone(helper))))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl fmt::Debug for FuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Builder for [`FuncMap`]
pub struct FuncMapBuilder {
    maps: Vec<HelperMap>,
    rightmost_overrides: bool,
    defaults: bool,
    clock: Option<Clock>,
}

impl FuncMapBuilder {
    pub fn new() -> Self {
        FuncMapBuilder {
            maps: Vec::new(),
            rightmost_overrides: false,
            defaults: true,
            clock: None,
        }
    }

    /// Merge caller maps, in order, after the built-ins
    pub fn with_maps(mut self, maps: impl IntoIterator<Item = HelperMap>) -> Self {
        self.maps.extend(maps);
        self
    }

    /// Let later definitions replace earlier ones
    pub fn rightmost_overrides(mut self) -> Self {
        self.rightmost_overrides = true;
        self
    }

    /// Leave the built-in helpers out
    pub fn without_defaults(mut self) -> Self {
        self.defaults = false;
        self
    }

    /// Use `clock` for `now`; `started` is read from it once, at build time
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> FuncMap {
        let (clock, started) = match self.clock {
            Some(clock) => {
                let started = clock();
                (clock, started)
            }
            None => {
                let clock: Clock = Arc::new(Local::now);
                (clock, crate::utils::started())
            }
        };

        let mut layers = Vec::with_capacity(self.maps.len() + 1);
        if self.defaults {
            layers.push(builtins::helpers(clock, started));
        }
        layers.extend(self.maps);

        let mut helpers = BTreeMap::new();
        for layer in layers {
            for (name, helper) in layer {
                let Some(helper) = helper else {
                    continue;
                };
                if self.rightmost_overrides || !helpers.contains_key(&name) {
                    helpers.insert(name, helper);
                }
            }
        }

        log::debug!("built helper map with {} helpers", helpers.len());
        FuncMap { helpers }
    }
}

impl Default for FuncMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(n: i64) -> Helper {
        helper(move |_| Ok(Value::Int(n)))
    }

    fn map(entries: &[(&str, Option<&Helper>)]) -> HelperMap {
        entries
            .iter()
            .map(|(name, helper)| (name.to_string(), helper.cloned()))
            .collect()
    }

    fn same(map: &FuncMap, name: &str, expected: &Helper) -> bool {
        map.get(name).is_some_and(|h| Arc::ptr_eq(h, expected))
    }

    #[test]
    fn test_empty() {
        let funcs = FuncMap::builder().without_defaults().with_maps(vec![]).build();
        assert!(funcs.is_empty());
    }

    #[test]
    fn test_simple_and_duplicates() {
        let (a, b) = (constant(1), constant(2));
        let funcs = FuncMap::builder()
            .without_defaults()
            .with_maps(vec![
                map(&[("add", Some(&a)), ("sub", Some(&b))]),
                map(&[("add", Some(&a)), ("sub", Some(&b))]),
            ])
            .build();
        assert_eq!(funcs.len(), 2);
        assert!(same(&funcs, "add", &a));
        assert!(same(&funcs, "sub", &b));
    }

    #[test]
    fn test_replacements() {
        let (a, b, c, d) = (constant(1), constant(2), constant(3), constant(4));
        let maps = vec![
            map(&[("add", Some(&a)), ("sub", Some(&b))]),
            map(&[("add", Some(&c)), ("sub", Some(&d))]),
        ];

        let leftmost = FuncMap::builder().without_defaults().with_maps(maps.clone()).build();
        assert!(same(&leftmost, "add", &a));
        assert!(same(&leftmost, "sub", &b));

        let rightmost = FuncMap::builder()
            .without_defaults()
            .with_maps(maps)
            .rightmost_overrides()
            .build();
        assert!(same(&rightmost, "add", &c));
        assert!(same(&rightmost, "sub", &d));
    }

    #[test]
    fn test_ignore_none() {
        let (a, b) = (constant(1), constant(2));
        for rightmost in [false, true] {
            let mut builder = FuncMap::builder().without_defaults().with_maps(vec![
                map(&[("add", None), ("sub", None)]),
                map(&[("add", Some(&a)), ("sub", Some(&b))]),
                map(&[("add", None)]),
            ]);
            if rightmost {
                builder = builder.rightmost_overrides();
            }
            let funcs = builder.build();
            assert!(same(&funcs, "add", &a));
            assert!(same(&funcs, "sub", &b));
        }
    }

    #[test]
    fn test_builtins_win_unless_overridden() {
        let custom = constant(99);
        let caller = vec![map(&[("add", Some(&custom)), ("extra", Some(&custom))])];

        let funcs = FuncMap::builder().with_maps(caller.clone()).build();
        assert!(!same(&funcs, "add", &custom));
        assert!(same(&funcs, "extra", &custom));
        assert_eq!(funcs.call("add", &[Value::Int(1), Value::Int(2)]).unwrap(), Value::Int(3));

        let funcs = FuncMap::builder().with_maps(caller).rightmost_overrides().build();
        assert_eq!(funcs.call("add", &[]).unwrap(), Value::Int(99));
    }

    #[test]
    fn test_unknown_helper() {
        let funcs = FuncMap::new();
        assert!(matches!(funcs.call("missing", &[]), Err(CallError::Unknown(name)) if name == "missing"));
    }
}
