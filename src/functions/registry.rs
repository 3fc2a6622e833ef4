// Copyright 2025 Windowkit Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Function Registry
//!
//! Looks up window functions by name and checks call arity before a
//! window specification is built.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use super::window::{
    CumeDistFunction, DenseRankFunction, LagFunction, LeadFunction, NtileFunction,
    PercentRankFunction, RankFunction, RowNumberFunction,
};
use super::{FunctionInfo, WindowFunction};
use crate::core::{Error, Result};

/// Global function registry instance
static GLOBAL_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Get the global function registry
#[inline]
pub fn global_registry() -> &'static FunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Type alias for window function factory
type WindowFnFactory = Arc<dyn Fn() -> Box<dyn WindowFunction> + Send + Sync>;

/// Registry of window functions, keyed by upper-case name
pub struct FunctionRegistry {
    window_functions: FxHashMap<String, WindowFnFactory>,
    function_info: FxHashMap<String, FunctionInfo>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions registered
    pub fn new() -> Self {
        let mut registry = Self {
            window_functions: FxHashMap::default(),
            function_info: FxHashMap::default(),
        };

        registry.register_window::<RowNumberFunction>();
        registry.register_window::<RankFunction>();
        registry.register_window::<DenseRankFunction>();
        registry.register_window::<PercentRankFunction>();
        registry.register_window::<CumeDistFunction>();
        registry.register_window::<NtileFunction>();
        registry.register_window::<LagFunction>();
        registry.register_window::<LeadFunction>();

        registry
    }

    /// Register a window function
    pub fn register_window<F: WindowFunction + Default + 'static>(&mut self) {
        let instance = F::default();
        let name = instance.name().to_uppercase();
        let info = instance.info();

        self.window_functions
            .insert(name.clone(), Arc::new(|| Box::new(F::default())));
        self.function_info.insert(name, info);
    }

    /// Get a new instance of a window function by name, with default arguments
    pub fn get_window(&self, name: &str) -> Option<Box<dyn WindowFunction>> {
        // Fast path - name is already uppercase
        if let Some(f) = self.window_functions.get(name) {
            return Some(f());
        }
        let upper = name.to_uppercase();
        self.window_functions.get(&upper).map(|f| f())
    }

    /// Check if a function name is a window function
    pub fn is_window(&self, name: &str) -> bool {
        self.window_functions.contains_key(name)
            || self.window_functions.contains_key(&name.to_uppercase())
    }

    /// Get function info by name
    pub fn get_info(&self, name: &str) -> Option<FunctionInfo> {
        self.function_info.get(&name.to_uppercase()).cloned()
    }

    /// Resolve a call `name(arg_count args)`
    ///
    /// Fails with `UnknownFunction` for unregistered names and
    /// `InvalidArgument` when the argument count is out of range.
    pub fn validate_call(&self, name: &str, arg_count: usize) -> Result<FunctionInfo> {
        let info = self
            .get_info(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
        info.signature
            .validate_arg_count(arg_count)
            .map_err(|err| match err {
                Error::InvalidArgument(msg) => {
                    Error::invalid_argument(format!("{}: {}", info.name, msg))
                }
                other => other,
            })?;
        Ok(info)
    }

    /// List all window function names, sorted
    pub fn list_windows(&self) -> Vec<String> {
        let mut names: Vec<String> = self.window_functions.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_window("ROW_NUMBER"));
        assert!(registry.is_window("RANK"));
        assert!(registry.is_window("DENSE_RANK"));
        assert!(registry.is_window("LAG"));
        assert!(registry.is_window("LEAD"));
        assert!(!registry.is_window("SUM"));
    }

    #[test]
    fn test_registry_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_window("dense_rank"));
        assert!(registry.is_window("Dense_Rank"));
        assert!(registry.get_info("lag").is_some());
    }

    #[test]
    fn test_get_window() {
        let registry = FunctionRegistry::new();
        let row_number = registry.get_window("row_number");
        assert!(row_number.is_some());
        assert_eq!(row_number.unwrap().name(), "ROW_NUMBER");
        assert!(registry.get_window("NOPE").is_none());
    }

    #[test]
    fn test_list_windows() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.list_windows(),
            vec![
                "CUME_DIST",
                "DENSE_RANK",
                "LAG",
                "LEAD",
                "NTILE",
                "PERCENT_RANK",
                "RANK",
                "ROW_NUMBER"
            ]
        );
    }

    #[test]
    fn test_validate_call() {
        let registry = global_registry();
        assert!(registry.validate_call("lag", 1).is_ok());
        assert!(registry.validate_call("lag", 3).is_ok());
        assert!(matches!(
            registry.validate_call("lag", 4),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.validate_call("rank", 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.validate_call("ntile", 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.validate_call("median", 1),
            Err(Error::UnknownFunction(name)) if name == "median"
        ));
    }
}
