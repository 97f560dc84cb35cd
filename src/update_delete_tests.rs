#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::builder::{BuildError, Builder};
    use crate::cond::{eq, lt};
    use crate::delete::delete_from;
    use crate::dialect::Dialect;
    use crate::update::update;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_set_keeps_insertion_order() {
        let mut ub = update("users");
        ub.set("name", "foo")
            .set("score", 10)
            .where_(eq("id", 1));

        let mut buf = Buffer::new();
        ub.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "UPDATE `users` SET `name` = ?, `score` = ? WHERE (`id` = ?)"
        );
        assert_eq!(buf.values().len(), 3);
    }

    #[test]
    fn update_order_by_limit() {
        let mut ub = update("jobs");
        ub.set("state", 1)
            .where_(eq("state", 0))
            .order_asc("created_at")
            .limit(100);

        let mut buf = Buffer::new();
        ub.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "UPDATE `jobs` SET `state` = ? WHERE (`state` = ?) ORDER BY `created_at` ASC LIMIT 100"
        );
    }

    #[test]
    fn update_without_set_fails() {
        let mut ub = update("users");
        ub.where_(eq("id", 1));
        let mut buf = Buffer::new();
        assert_eq!(
            ub.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingSet)
        );
    }

    #[test]
    fn update_without_table_fails() {
        let mut ub = update("");
        ub.set("a", 1);
        let mut buf = Buffer::new();
        assert_eq!(
            ub.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingTable)
        );
    }

    #[test]
    fn delete_with_conditions() {
        let mut db = delete_from("events");
        db.where_(lt("created_at", "2024-01-01")).limit(1000);

        let mut buf = Buffer::new();
        db.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "DELETE FROM `events` WHERE (`created_at` < ?) LIMIT 1000"
        );
    }

    #[test]
    fn delete_order_by_limit() {
        let mut db = delete_from("events");
        db.where_(eq("archived", true))
            .order_asc("created_at")
            .limit(100);

        let mut buf = Buffer::new();
        db.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "DELETE FROM `events` WHERE (`archived` = ?) ORDER BY `created_at` ASC LIMIT 100"
        );
    }

    #[test]
    fn delete_without_table_fails() {
        let db = delete_from("");
        let mut buf = Buffer::new();
        assert_eq!(
            db.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingTable)
        );
    }

    #[test]
    fn delete_comment_prepended() {
        let mut db = delete_from("events");
        db.comment("purge").where_(eq("archived", true));
        let mut buf = Buffer::new();
        db.render(Dialect::PostgreSQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "/* purge */\nDELETE FROM \"events\" WHERE (\"archived\" = ?)"
        );
    }
}
