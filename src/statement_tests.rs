#[cfg(test)]
mod tests {
    use crate::error::ArgumentError;
    use crate::escaper::Escaper;
    use crate::flavor::Flavor;
    use crate::operand::Column;
    use crate::select::Select;
    use crate::statement::{Aliased, Statement, aliased};
    use crate::subquery::Subquery;
    use pretty_assertions::assert_eq;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::Registry;

    #[derive(Debug, Clone, PartialEq)]
    struct Captured {
        level: Level,
        target: String,
        fields: Vec<(String, String)>,
    }

    #[derive(Clone, Default)]
    struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

    impl CaptureLayer {
        fn events(&self) -> Vec<Captured> {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct FieldsVisitor(Vec<(String, String)>);

    impl Visit for FieldsVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.push((field.name().to_string(), value.to_string()));
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldsVisitor::default();
            event.record(&mut visitor);
            self.0.lock().unwrap().push(Captured {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields: visitor.0,
            });
        }
    }

    fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Captured>) {
        let layer = CaptureLayer::default();
        let subscriber = Registry::default().with(layer.clone());
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, layer.events())
    }

    fn stmt() -> Select {
        Select::with_escaper(Flavor::MySQL.escaper())
    }

    #[test]
    fn render_identifier() {
        let s = stmt();
        assert_eq!(s.render_identifier(&"name".into()).unwrap(), "`name`");
        assert_eq!(s.render_identifier(&"t.*".into()).unwrap(), "`t`.*");
        assert_eq!(s.render_identifier(&"*".into()).unwrap(), "*");
        assert_eq!(
            s.render_identifier(&Column::from(Subquery::new(|_| "SELECT 1".to_string())))
                .unwrap(),
            "(SELECT 1)"
        );
    }

    #[test]
    fn render_aliased_identifier() {
        let s = stmt();
        assert_eq!(
            s.render_aliased_identifier(&aliased([("foo", "name")]).unwrap())
                .unwrap(),
            "`name` AS `foo`"
        );
        assert_eq!(
            s.render_aliased_identifier(&"name".into()).unwrap(),
            "`name`"
        );
        assert_eq!(
            s.render_aliased_identifier(&Aliased::with_alias("b`ar", "users.name"))
                .unwrap(),
            "`users`.`name` AS `b``ar`"
        );
    }

    #[test]
    fn aliased_subquery() {
        let s = stmt();
        let sq = Subquery::try_new(|e: &dyn Escaper| {
            Ok(format!(
                "SELECT id from table where username = {}",
                e.quote(&"'hack".into())?
            ))
        });
        let a = aliased([("foo", sq)]).unwrap();
        assert_eq!(a.alias(), Some("foo"));
        assert_eq!(
            s.render_aliased_identifier(&a).unwrap(),
            "(SELECT id from table where username = '\\'hack') AS `foo`"
        );
    }

    #[test]
    fn alias_mapping_needs_exactly_one_key() {
        let err = aliased([("foo", "a"), ("bar", "b")]).unwrap_err();
        assert_eq!(err, ArgumentError::AliasKeys(2));
        assert_eq!(err.to_string(), "Aliased column must have only 1 key");

        let err = aliased(Vec::<(String, String)>::new()).unwrap_err();
        assert_eq!(err, ArgumentError::AliasKeys(0));
    }

    #[test]
    fn subquery_helper_wraps_in_parens() {
        let s = stmt();
        let sq = Subquery::new(|e: &dyn Escaper| format!("SELECT {}", e.escape_identifier("x")));
        assert_eq!(s.subquery(&sq).unwrap(), "(SELECT `x`)");
    }

    #[test]
    fn successful_render_emits_trace_event() {
        let mut s = stmt();
        s.from(["users"]).where_equal("id", 1);
        let (sql, events) = capture(|| s.sql());
        let sql = sql.unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::TRACE);
        assert_eq!(event.target, "halo_composer::render");
        assert_eq!(event.fields.len(), 3);
        for field in [
            ("message", "rendered statement"),
            ("statement", "SELECT"),
            ("sql", sql.as_str()),
        ] {
            let field = (field.0.to_string(), field.1.to_string());
            assert!(event.fields.contains(&field), "missing {field:?}");
        }
    }

    #[test]
    fn failed_render_emits_debug_event() {
        let mut s = stmt();
        s.limit(0, None);
        let (result, events) = capture(|| s.sql());
        let err = result.unwrap_err();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::DEBUG);
        assert_eq!(events[0].target, "halo_composer::render");
        assert!(events[0]
            .fields
            .contains(&("error".to_string(), err.to_string())));
        assert!(events[0]
            .fields
            .contains(&("statement".to_string(), "SELECT".to_string())));
    }
}
