//! Declarative macro for column enum definitions.

/// Define a column enum and its [`EntityColumn`](crate::entity::EntityColumn) impl.
///
/// Each variant maps to a column name and a [`FieldKind`](crate::entity::FieldKind),
/// with optional flags: `primary_key`, `fill_insert`, `fill_update`,
/// `fill_insert_update`.
///
/// # Example
///
/// ```
/// use buoy::EntityColumn;
///
/// buoy::columns! {
///     pub enum UserColumn {
///         Id: "id", BigInt, primary_key;
///         Name: "name", Text;
///         CreatedAt: "created_at", Timestamp, fill_insert;
///     }
/// }
///
/// assert_eq!(UserColumn::Name.name(), "name");
/// assert!(UserColumn::Id.def().primary_key);
/// assert_eq!(UserColumn::all().len(), 3);
/// ```
#[macro_export]
macro_rules! columns {
    (
        $vis:vis enum $name:ident {
            $( $variant:ident : $column:literal, $kind:ident $(, $flag:ident)* ; )*
        }
    ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        $vis enum $name {
            $( $variant, )*
        }

        impl $crate::entity::EntityColumn for $name {
            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $column, )*
                }
            }

            fn def(self) -> $crate::entity::FieldDef {
                match self {
                    $( Self::$variant => {
                        #[allow(unused_mut)]
                        let mut def = $crate::entity::FieldDef::new(
                            $column,
                            $crate::entity::FieldKind::$kind,
                        );
                        $( def = $crate::columns!(@flag def $flag); )*
                        def
                    } )*
                }
            }

            fn all() -> &'static [Self] {
                &[ $( Self::$variant, )* ]
            }
        }
    };

    (@flag $def:ident primary_key) => { $def.primary_key() };
    (@flag $def:ident fill_insert) => {
        $def.fill($crate::entity::FieldFill::Insert)
    };
    (@flag $def:ident fill_update) => {
        $def.fill($crate::entity::FieldFill::Update)
    };
    (@flag $def:ident fill_insert_update) => {
        $def.fill($crate::entity::FieldFill::InsertUpdate)
    };
}

#[cfg(test)]
mod tests {
    use crate::entity::{EntityColumn, FieldFill, FieldKind};

    crate::columns! {
        pub enum TestColumn {
            Id: "id", BigInt, primary_key;
            Name: "name", Text;
            UpdatedAt: "updated_at", Timestamp, fill_insert_update;
        }
    }

    #[test]
    fn test_names_and_order() {
        assert_eq!(TestColumn::Id.name(), "id");
        assert_eq!(TestColumn::Name.name(), "name");
        assert_eq!(
            TestColumn::all(),
            &[TestColumn::Id, TestColumn::Name, TestColumn::UpdatedAt]
        );
    }

    #[test]
    fn test_defs_carry_flags() {
        assert!(TestColumn::Id.def().primary_key);
        assert_eq!(TestColumn::Id.def().kind, FieldKind::BigInt);
        assert_eq!(TestColumn::Name.def().fill, FieldFill::Default);
        assert_eq!(TestColumn::UpdatedAt.def().fill, FieldFill::InsertUpdate);
        assert!(!TestColumn::UpdatedAt.def().primary_key);
    }
}
