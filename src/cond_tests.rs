#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::builder::{Arg, Builder, subquery};
    use crate::cond::{BuilderExt, and, eq, gt, in_, like, neq, not_in, or};
    use crate::dialect::Dialect;
    use crate::select::select;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn render(b: &dyn Builder, dialect: Dialect) -> Buffer {
        let mut buf = Buffer::new();
        b.render(dialect, &mut buf).unwrap();
        buf
    }

    #[test]
    fn eq_defers_scalar_value() {
        let buf = render(&eq("id", 7), Dialect::MySQL);
        assert_eq!(buf.sql(), "`id` = ?");
        assert_eq!(buf.values(), &[Arg::Value(Value::I64(7))]);
    }

    #[test]
    fn eq_null_renders_is_null() {
        let buf = render(&eq("deleted_at", Value::Null), Dialect::MySQL);
        assert_eq!(buf.sql(), "`deleted_at` IS NULL");
        assert_eq!(buf.values().len(), 0);

        let buf = render(&neq("deleted_at", Value::Null), Dialect::MySQL);
        assert_eq!(buf.sql(), "`deleted_at` IS NOT NULL");
    }

    #[test]
    fn eq_collection_renders_in_with_one_deferred_list() {
        let buf = render(&eq("status", vec![1_i64, 2, 5]), Dialect::MySQL);
        assert_eq!(buf.sql(), "`status` IN ?");
        assert_eq!(
            buf.values(),
            &[Arg::Value(Value::List(vec![
                Value::I64(1),
                Value::I64(2),
                Value::I64(5)
            ]))]
        );

        let buf = render(&neq("status", vec![1_i64, 2]), Dialect::MySQL);
        assert_eq!(buf.sql(), "`status` NOT IN ?");
    }

    #[test]
    fn eq_empty_collection_is_false_literal() {
        let buf = render(&eq("id", Vec::<i64>::new()), Dialect::MySQL);
        assert_eq!(buf.sql(), "0");
        assert_eq!(buf.values().len(), 0);

        let buf = render(&eq("id", Vec::<i64>::new()), Dialect::PostgreSQL);
        assert_eq!(buf.sql(), "FALSE");
    }

    #[test]
    fn neq_empty_collection_is_true_literal() {
        let buf = render(&neq("id", Vec::<i64>::new()), Dialect::MySQL);
        assert_eq!(buf.sql(), "1");

        let buf = render(&not_in("id", Vec::<i64>::new()), Dialect::PostgreSQL);
        assert_eq!(buf.sql(), "TRUE");
    }

    #[test]
    fn comparison_operators() {
        let buf = render(&gt("score", 90), Dialect::PostgreSQL);
        assert_eq!(buf.sql(), "\"score\" > ?");

        let buf = render(&like("email", "%@example.com"), Dialect::MySQL);
        assert_eq!(buf.sql(), "`email` LIKE ?");
    }

    #[test]
    fn in_with_subquery_defers_builder() {
        let mut sub = select(["id"]);
        sub.from("banned");
        let buf = render(&in_("user_id", subquery(sub)), Dialect::MySQL);
        assert_eq!(buf.sql(), "`user_id` IN ?");
        assert_eq!(buf.values().len(), 1);
        assert!(matches!(buf.values()[0], Arg::Builder(_)));
    }

    #[test]
    fn and_parenthesizes_each_child() {
        let c = and([eq("a", 1).boxed(), eq("b", 2).boxed()]);
        let buf = render(&c, Dialect::MySQL);
        assert_eq!(buf.sql(), "(`a` = ?) AND (`b` = ?)");
        assert_eq!(buf.values().len(), 2);
    }

    #[test]
    fn or_nested_inside_and() {
        let c = and([
            eq("a", 1).boxed(),
            or([eq("b", 2).boxed(), eq("c", 3).boxed()]).boxed(),
        ]);
        let buf = render(&c, Dialect::MySQL);
        assert_eq!(buf.sql(), "(`a` = ?) AND ((`b` = ?) OR (`c` = ?))");
    }

    #[test]
    fn single_child_combinator_has_no_operator() {
        let c = or([eq("a", 1).boxed()]);
        let buf = render(&c, Dialect::MySQL);
        assert_eq!(buf.sql(), "(`a` = ?)");
    }

    #[test]
    fn empty_combinator_renders_nothing() {
        let c = and(Vec::new());
        let buf = render(&c, Dialect::MySQL);
        assert_eq!(buf.sql(), "");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let c = eq("status", vec![1_i64, 2]);
        let a = render(&c, Dialect::MySQL);
        let b = render(&c, Dialect::MySQL);
        assert_eq!(a.sql(), b.sql());
        assert_eq!(a.values(), b.values());
    }
}
