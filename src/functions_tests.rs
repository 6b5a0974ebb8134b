#[cfg(test)]
mod tests {
    use crate::error::ArgumentError;
    use crate::flavor::Flavor;
    use crate::functions::*;
    use crate::operand::Operand;
    use crate::operands;
    use crate::select::Select;
    use crate::statement::Statement;
    use crate::subquery::Subquery;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn eval(sq: &Subquery) -> String {
        sq.evaluate(&Flavor::MySQL).unwrap()
    }

    #[test]
    fn concat_values() {
        assert_eq!(eval(&concat("foo", 123, operands![])), "CONCAT('foo', 123)");
        assert_eq!(
            eval(&concat("a", "b", operands!["c", ()])),
            "CONCAT('a', 'b', 'c', NULL)"
        );
        assert_eq!(
            eval(&concat_ws("-", operands!["a", 1])),
            "CONCAT_WS('-', 'a', 1)"
        );
    }

    #[test]
    fn single_argument_functions() {
        assert_eq!(eval(&hex("foo")), "HEX('foo')");
        assert_eq!(eval(&unhex("666F6F")), "UNHEX('666F6F')");
        assert_eq!(eval(&lower("Foo")), "LOWER('Foo')");
        assert_eq!(eval(&upper("Foo")), "UPPER('Foo')");
        assert_eq!(eval(&length("foo")), "LENGTH('foo')");
        assert_eq!(eval(&md5("foo")), "MD5('foo')");
    }

    #[test]
    fn zero_and_optional_arguments() {
        assert_eq!(eval(&now(None)), "NOW()");
        assert_eq!(eval(&now(3)), "NOW(3)");
        assert_eq!(eval(&uuid()), "UUID()");
        assert_eq!(eval(&coalesce(operands![(), "x"])), "COALESCE(NULL, 'x')");
        assert_eq!(eval(&if_null(Option::<i32>::None, 0)), "IFNULL(NULL, 0)");
    }

    #[test]
    fn same_returns_text_verbatim() {
        assert_eq!(eval(&same("COUNT(*)")), "COUNT(*)");
        // 作为操作数时照样加括号
        assert_eq!(
            Operand::from(same("COUNT(*)")).render(&Flavor::MySQL).unwrap(),
            "(COUNT(*))"
        );
    }

    #[test]
    fn string_arguments_are_escaped() {
        assert_eq!(eval(&upper("it's")), "UPPER('it\\'s')");
    }

    #[test]
    fn cast_types() {
        assert!(cast("1", "SIGNED").is_err());
        assert_eq!(eval(&cast("1", "unsigned integer").unwrap()), "CAST('1' AS UNSIGNED INTEGER)");
        assert_eq!(eval(&cast(3.5, "Char").unwrap()), "CAST(3.5 AS CHAR)");
        assert_eq!("datetime".parse::<CastType>(), Ok(CastType::DateTime));
    }

    #[test]
    fn cast_invalid_type_fails_immediately() {
        let err = cast(1, "json").unwrap_err();
        assert_eq!(err, ArgumentError::InvalidCastType("json".into()));
        assert_eq!(err.to_string(), "Invalid CAST type: json");
    }

    #[test]
    fn trim_variants() {
        assert_eq!(eval(&trim("  x ", None, None).unwrap()), "TRIM('  x ')");
        assert_eq!(
            eval(&trim("xxfooxx", Some("leading"), Some("x".into())).unwrap()),
            "TRIM(LEADING 'x' FROM 'xxfooxx')"
        );
        assert_eq!(
            eval(&trim("  foo  ", Some("BOTH"), None).unwrap()),
            "TRIM(BOTH FROM '  foo  ')"
        );
        assert_eq!(
            eval(&trim("foo..", None, Some(".".into())).unwrap()),
            "TRIM('.' FROM 'foo..')"
        );
    }

    #[test]
    fn trim_invalid_specifier() {
        let err = trim("x", Some("middle"), None).unwrap_err();
        assert_eq!(err, ArgumentError::InvalidTrimSpecifier("middle".into()));
    }

    #[test]
    fn nested_functions_are_parenthesized() {
        let inner = hex("b");
        assert_eq!(
            eval(&concat("a", inner, operands![lower("C")])),
            "CONCAT('a', (HEX('b')), (LOWER('C')))"
        );
    }

    #[test]
    fn arguments_render_lazily() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let arg = Subquery::new(move |_| {
            counter.set(counter.get() + 1);
            "SELECT 1".to_string()
        });
        let f = md5(arg);
        assert_eq!(calls.get(), 0);
        assert_eq!(eval(&f), "MD5((SELECT 1))");
        assert_eq!(eval(&f), "MD5((SELECT 1))");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn function_as_condition_value() {
        let mut s = Select::with_escaper(Flavor::MySQL.escaper());
        s.from(["events"])
            .where_less_than("created_at", now(None))
            .where_equal(upper("code"), "ABC");
        assert_eq!(
            s.sql().unwrap(),
            "SELECT\n*\n FROM `events`\n WHERE `created_at` < (NOW()) AND (UPPER('code')) = 'ABC'\n"
        );
    }
}
