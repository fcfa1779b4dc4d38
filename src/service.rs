//! Transfer/persisted object conversion service.
//!
//! `VoService` pairs a transfer-object type (the externally facing representation)
//! with an entity's persisted model and provides the conversion and bulk-read
//! operations on top of the builder layer. The `before_put`/`after_put` hooks are
//! default no-ops for implementors to override with side effects such as
//! timestamping; they are plain trait methods, not a plugin mechanism.
//!
//! # Example
//!
//! ```no_run
//! use buoy::{BuoyExecutor, VoService};
//! use serde::{Deserialize, Serialize};
//!
//! # use buoy::{columns, BuoyEntity, BuoyEntityName};
//! # #[derive(Default, Copy, Clone, Debug)]
//! # pub struct User;
//! # impl BuoyEntityName for User {
//! #     fn table_name(&self) -> &'static str { "users" }
//! # }
//! # buoy::columns! {
//! #     pub enum UserColumn {
//! #         Id: "id", BigInt, primary_key;
//! #         Name: "name", Text;
//! #     }
//! # }
//! # #[derive(Serialize, Deserialize, Clone, Debug)]
//! # pub struct UserModel { id: Option<i64>, name: String }
//! # impl BuoyEntity for User {
//! #     type Model = UserModel;
//! #     type Column = UserColumn;
//! # }
//! #[derive(Serialize, Deserialize, Clone, Debug)]
//! struct UserVo {
//!     #[serde(default)]
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! struct UserService;
//!
//! impl VoService for UserService {
//!     type Entity = User;
//!     type Vo = UserVo;
//!
//!     fn before_put(&self, vo: &mut UserVo) {
//!         vo.name = vo.name.trim().to_string();
//!     }
//! }
//!
//! # let executor: &dyn BuoyExecutor = todo!();
//! let service = UserService;
//! let mut vo = UserVo { id: None, name: " qi ".to_string() };
//! service.put(executor, &mut vo)?;
//! let everyone = service.list_all(executor)?;
//! # Ok::<(), buoy::BuoyError>(())
//! ```

use crate::active_model;
use crate::convert;
use crate::entity::BuoyEntity;
use crate::executor::{BuoyError, BuoyExecutor};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Conversion service between a transfer-object type and an entity's model
///
/// The two concrete types are declared statically through the associated types;
/// nothing is discovered at runtime.
pub trait VoService {
    /// The entity whose model is the persisted representation
    type Entity: BuoyEntity;
    /// The transfer-object type
    type Vo: Serialize + DeserializeOwned;

    /// Hook running immediately before conversion-and-save; default no-op
    fn before_put(&self, _vo: &mut Self::Vo) {}

    /// Hook running immediately after conversion-and-save; default no-op
    fn after_put(&self, _vo: &Self::Vo, _model: &<Self::Entity as BuoyEntity>::Model) {}

    /// Convert a transfer object to the persisted representation
    ///
    /// Unmapped fields are silently skipped.
    fn to_model(&self, vo: &Self::Vo) -> Result<<Self::Entity as BuoyEntity>::Model, BuoyError> {
        convert::copy(vo)
    }

    /// Convert a persisted model to the transfer representation
    ///
    /// Unmapped fields are silently skipped.
    fn to_vo(&self, model: &<Self::Entity as BuoyEntity>::Model) -> Result<Self::Vo, BuoyError> {
        convert::copy(model)
    }

    /// Create or update the object behind a transfer object
    ///
    /// Runs `before_put`, converts, saves (insert when the primary key is absent,
    /// update by id otherwise), then runs `after_put`. Returns `true` when a row
    /// was written.
    fn put(&self, executor: &dyn BuoyExecutor, vo: &mut Self::Vo) -> Result<bool, BuoyError> {
        self.before_put(vo);
        let model = self.to_model(vo)?;
        let written = active_model::save::<Self::Entity>(executor, &model)?;
        self.after_put(vo, &model);
        Ok(written)
    }

    /// Fetch every persisted row as a transfer object
    ///
    /// Returns an empty `Vec`, never an error, when there are no rows.
    fn list_all(&self, executor: &dyn BuoyExecutor) -> Result<Vec<Self::Vo>, BuoyError> {
        let models = <Self::Entity as BuoyEntity>::builder().all(executor)?;
        models.iter().map(|model| self.to_vo(model)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockExecutor;
    use crate::tests_cfg::{user_row, User, UserModel};
    use serde::Deserialize;
    use std::cell::Cell;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct UserVo {
        #[serde(default)]
        id: Option<i64>,
        name: String,
        #[serde(default)]
        age: Option<i32>,
        // present only on the transfer side; dropped on conversion
        #[serde(default)]
        display_name: Option<String>,
    }

    #[derive(Default)]
    struct UserService {
        before_calls: Cell<u32>,
        after_calls: Cell<u32>,
    }

    impl VoService for UserService {
        type Entity = User;
        type Vo = UserVo;

        fn before_put(&self, vo: &mut UserVo) {
            self.before_calls.set(self.before_calls.get() + 1);
            vo.name = vo.name.trim().to_string();
        }

        fn after_put(&self, _vo: &UserVo, _model: &UserModel) {
            self.after_calls.set(self.after_calls.get() + 1);
        }
    }

    fn sample_vo() -> UserVo {
        UserVo {
            id: None,
            name: " qi ".to_string(),
            age: Some(30),
            display_name: Some("Qi".to_string()),
        }
    }

    #[test]
    fn test_put_runs_hooks_around_save() {
        let executor = MockExecutor::new().with_affected(1);
        let service = UserService::default();
        let mut vo = sample_vo();

        let written = service.put(&executor, &mut vo).unwrap();
        assert!(written);
        assert_eq!(service.before_calls.get(), 1);
        assert_eq!(service.after_calls.get(), 1);
        // before_put ran before conversion
        assert_eq!(vo.name, "qi");
        assert!(executor.statements()[0].0.starts_with("INSERT"));
    }

    #[test]
    fn test_to_model_drops_transfer_only_fields() {
        let service = UserService::default();
        let model = service.to_model(&sample_vo()).unwrap();
        assert_eq!(model.name, " qi ");
        assert_eq!(model.age, Some(30));
    }

    #[test]
    fn test_round_trip_preserves_matching_fields() {
        let service = UserService::default();
        let mut vo = sample_vo();
        vo.name = "qi".to_string();

        let model = service.to_model(&vo).unwrap();
        let back = service.to_vo(&model).unwrap();
        assert_eq!(back.name, vo.name);
        assert_eq!(back.age, vo.age);
        // the transfer-only field was dropped, not errored
        assert_eq!(back.display_name, None);
    }

    #[test]
    fn test_list_all_empty_returns_empty_vec() {
        let executor = MockExecutor::new().with_rows(vec![]);
        let service = UserService::default();
        let vos = service.list_all(&executor).unwrap();
        assert!(vos.is_empty());
    }

    #[test]
    fn test_list_all_converts_each_row() {
        let executor = MockExecutor::new().with_rows(vec![user_row(1, "qi"), user_row(2, "zq")]);
        let service = UserService::default();
        let vos = service.list_all(&executor).unwrap();
        assert_eq!(vos.len(), 2);
        assert_eq!(vos[0].name, "qi");
        assert_eq!(vos[1].id, Some(2));
    }
}
