//! 宏集合：异构操作数列表，以及按运算符批量生成 AND/OR 便捷方法。

/// 把不同类型的值收集成 `Vec<Operand>`，用于 `IN` 列表、`CONCAT` 等变长参数。
///
/// ```ignore
/// let values = operands!["foo", 123, true];
/// ```
#[macro_export]
macro_rules! operands {
    () => {
        Vec::<$crate::operand::Operand>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::operand::Operand::from($value)),+]
    };
}

/// 为持有 `ConditionClause` 字段的语句生成条件方法。
///
/// 每个运算符生成一对方法（AND / OR 连接），全部转发到 `ConditionClause::add_predicate`，
/// 自身不含任何逻辑。
macro_rules! impl_condition_methods {
    (
        $ty:ty, $clause:ident;
        general { $and:ident / $or:ident }
        unary { $($u_and:ident / $u_or:ident => $u_op:literal),* $(,)? }
        list { $($l_and:ident / $l_or:ident => $l_op:literal),* $(,)? }
        range { $($r_and:ident / $r_or:ident => $r_op:literal),* $(,)? }
        nullary { $($n_and:ident / $n_or:ident => $n_op:literal),* $(,)? }
    ) => {
        impl $ty {
            /// 追加 `AND <column> <operator> ...values`。
            pub fn $and<V>(
                &mut self,
                column: impl Into<$crate::operand::Column>,
                operator: &str,
                values: impl IntoIterator<Item = V>,
            ) -> &mut Self
            where
                V: Into<$crate::operand::Operand>,
            {
                self.$clause
                    .add_predicate($crate::condition::Glue::And, column, operator, values);
                self
            }

            /// 追加 `OR <column> <operator> ...values`。
            pub fn $or<V>(
                &mut self,
                column: impl Into<$crate::operand::Column>,
                operator: &str,
                values: impl IntoIterator<Item = V>,
            ) -> &mut Self
            where
                V: Into<$crate::operand::Operand>,
            {
                self.$clause
                    .add_predicate($crate::condition::Glue::Or, column, operator, values);
                self
            }

            $(
                #[doc = concat!("追加 `AND <column> ", $u_op, " <value>`。")]
                pub fn $u_and(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    value: impl Into<$crate::operand::Operand>,
                ) -> &mut Self {
                    let value: $crate::operand::Operand = value.into();
                    self.$and(column, $u_op, [value])
                }

                #[doc = concat!("追加 `OR <column> ", $u_op, " <value>`。")]
                pub fn $u_or(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    value: impl Into<$crate::operand::Operand>,
                ) -> &mut Self {
                    let value: $crate::operand::Operand = value.into();
                    self.$or(column, $u_op, [value])
                }
            )*

            $(
                #[doc = concat!("追加 `AND <column> ", $l_op, " (...values)`；空列表在渲染时报错。")]
                pub fn $l_and<V>(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    values: impl IntoIterator<Item = V>,
                ) -> &mut Self
                where
                    V: Into<$crate::operand::Operand>,
                {
                    self.$and(column, $l_op, values)
                }

                #[doc = concat!("追加 `OR <column> ", $l_op, " (...values)`；空列表在渲染时报错。")]
                pub fn $l_or<V>(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    values: impl IntoIterator<Item = V>,
                ) -> &mut Self
                where
                    V: Into<$crate::operand::Operand>,
                {
                    self.$or(column, $l_op, values)
                }
            )*

            $(
                #[doc = concat!("追加 `AND <column> ", $r_op, " <min> AND <max>`。")]
                pub fn $r_and(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    min: impl Into<$crate::operand::Operand>,
                    max: impl Into<$crate::operand::Operand>,
                ) -> &mut Self {
                    let bounds: [$crate::operand::Operand; 2] = [min.into(), max.into()];
                    self.$and(column, $r_op, bounds)
                }

                #[doc = concat!("追加 `OR <column> ", $r_op, " <min> AND <max>`。")]
                pub fn $r_or(
                    &mut self,
                    column: impl Into<$crate::operand::Column>,
                    min: impl Into<$crate::operand::Operand>,
                    max: impl Into<$crate::operand::Operand>,
                ) -> &mut Self {
                    let bounds: [$crate::operand::Operand; 2] = [min.into(), max.into()];
                    self.$or(column, $r_op, bounds)
                }
            )*

            $(
                #[doc = concat!("追加 `AND <column> ", $n_op, "`。")]
                pub fn $n_and(&mut self, column: impl Into<$crate::operand::Column>) -> &mut Self {
                    self.$and(column, $n_op, $crate::operands![])
                }

                #[doc = concat!("追加 `OR <column> ", $n_op, "`。")]
                pub fn $n_or(&mut self, column: impl Into<$crate::operand::Column>) -> &mut Self {
                    self.$or(column, $n_op, $crate::operands![])
                }
            )*
        }
    };
}

pub(crate) use impl_condition_methods;
