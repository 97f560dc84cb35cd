#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::builder::{Arg, BuildError, Builder};
    use crate::cond::{BuilderExt, eq};
    use crate::dialect::Dialect;
    use crate::interpolate::literal;
    use crate::select::select;
    use crate::union::{union, union_all};
    use pretty_assertions::assert_eq;

    fn two_selects() -> (crate::select::SelectBuilder, crate::select::SelectBuilder) {
        let mut a = select(["id"]);
        a.from("active_users").where_(eq("status", 1));
        let mut b = select(["id"]);
        b.from("archived_users");
        (a, b)
    }

    #[test]
    fn members_are_deferred_values() {
        let (a, b) = two_selects();
        let u = union([a.boxed(), b.boxed()]);
        let mut buf = Buffer::new();
        u.render(Dialect::MySQL, &mut buf).unwrap();

        assert_eq!(buf.sql(), "(?) UNION (?)");
        assert_eq!(buf.values().len(), 2);
        assert!(matches!(buf.values()[0], Arg::Builder(_)));
    }

    #[test]
    fn union_interpolates_without_double_parens() {
        let (a, b) = two_selects();
        let u = union([a.boxed(), b.boxed()]);
        let sql = literal(Dialect::MySQL, &u).unwrap();
        assert_eq!(
            sql,
            "(SELECT id FROM `active_users` WHERE (`status` = 1)) UNION \
             (SELECT id FROM `archived_users`)"
        );
    }

    #[test]
    fn union_all_with_tail_clauses() {
        let (a, b) = two_selects();
        let mut u = union_all([a.boxed(), b.boxed()]);
        u.order_desc("id").limit(10).offset(5);
        let sql = literal(Dialect::MySQL, &u).unwrap();
        assert_eq!(
            sql,
            "(SELECT id FROM `active_users` WHERE (`status` = 1)) UNION ALL \
             (SELECT id FROM `archived_users`) ORDER BY `id` DESC LIMIT 10 OFFSET 5"
        );
    }

    #[test]
    fn empty_union_fails() {
        let u = union(Vec::new());
        let mut buf = Buffer::new();
        assert_eq!(
            u.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingStatements)
        );
    }

    #[test]
    fn nested_union_as_member() {
        let (a, b) = two_selects();
        let inner = union([a.boxed(), b.boxed()]);
        let mut c = select(["id"]);
        c.from("pending_users");
        let outer = union_all([inner.boxed(), c.boxed()]);
        let sql = literal(Dialect::MySQL, &outer).unwrap();
        assert_eq!(
            sql,
            "((SELECT id FROM `active_users` WHERE (`status` = 1)) UNION \
             (SELECT id FROM `archived_users`)) UNION ALL (SELECT id FROM `pending_users`)"
        );
    }
}
