#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::builder::{Arg, BuildError, Builder};
    use crate::dialect::Dialect;
    use crate::insert::{InsertBuilder, insert_ignore_into, insert_into, replace_into};
    use crate::record::BindError;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, Clone)]
    struct User {
        id: i64,
        name: String,
    }

    crate::sql_record! {
        impl User {
            id:   { db: "" },
            name: { db: "" },
        }
    }

    fn render(b: &InsertBuilder, dialect: Dialect) -> Buffer {
        let mut buf = Buffer::new();
        b.render(dialect, &mut buf).unwrap();
        buf
    }

    #[test]
    fn multi_row_insert() {
        let mut ib = insert_into("users");
        ib.columns(["id", "name"])
            .values([Arg::from(1_i64), Arg::from("foo")])
            .values([Arg::from(2_i64), Arg::from("bar")]);

        let buf = render(&ib, Dialect::MySQL);
        assert_eq!(
            buf.sql(),
            "INSERT INTO `users` (`id`, `name`) VALUES (?, ?), (?, ?)"
        );
        assert_eq!(buf.values().len(), 4);
    }

    #[test]
    fn insert_ignore_verb_per_dialect() {
        let mut ib = insert_ignore_into("users");
        ib.columns(["id"]).values([1_i64]);

        let buf = render(&ib, Dialect::MySQL);
        assert_eq!(buf.sql(), "INSERT IGNORE INTO `users` (`id`) VALUES (?)");

        let buf = render(&ib, Dialect::SQLite);
        assert_eq!(buf.sql(), "INSERT OR IGNORE INTO \"users\" (\"id\") VALUES (?)");

        let buf = render(&ib, Dialect::PostgreSQL);
        assert_eq!(
            buf.sql(),
            "INSERT INTO \"users\" (\"id\") VALUES (?) ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn replace_into_mysql() {
        let mut ib = replace_into("users");
        ib.columns(["id"]).values([1_i64]);
        let buf = render(&ib, Dialect::MySQL);
        assert_eq!(buf.sql(), "REPLACE INTO `users` (`id`) VALUES (?)");
    }

    #[test]
    fn returning_per_dialect() {
        let mut ib = insert_into("users");
        ib.columns(["name"]).values(["foo"]).returning(["id"]);

        let buf = render(&ib, Dialect::PostgreSQL);
        assert_eq!(
            buf.sql(),
            "INSERT INTO \"users\" (\"name\") VALUES (?) RETURNING \"id\""
        );

        let buf = render(&ib, Dialect::SQLServer);
        assert_eq!(
            buf.sql(),
            "INSERT INTO \"users\" (\"name\") OUTPUT INSERTED.\"id\" VALUES (?)"
        );

        // MySQL 无 RETURNING，静默省略。
        let buf = render(&ib, Dialect::MySQL);
        assert_eq!(buf.sql(), "INSERT INTO `users` (`name`) VALUES (?)");
    }

    #[test]
    fn record_binds_declared_columns() {
        let u = User {
            id: 7,
            name: "bob".to_string(),
        };
        let mut ib = insert_into("users");
        ib.columns(["id", "name"]).record(&u);

        let buf = render(&ib, Dialect::MySQL);
        assert_eq!(buf.sql(), "INSERT INTO `users` (`id`, `name`) VALUES (?, ?)");
        assert_eq!(
            buf.values(),
            &[
                Arg::Value(Value::I64(7)),
                Arg::Value(Value::Text("bob".into()))
            ]
        );
    }

    #[test]
    fn record_with_unresolved_column_fails_at_render() {
        let u = User::default();
        let mut ib = insert_into("users");
        ib.columns(["id", "nickname"]).record(&u);

        let mut buf = Buffer::new();
        assert_eq!(
            ib.render(Dialect::MySQL, &mut buf),
            Err(BuildError::Bind(BindError::UnresolvedColumn(
                "nickname".to_string()
            )))
        );
    }

    #[test]
    fn structural_checks_fail_fast() {
        let mut ib = insert_into("users");
        let mut buf = Buffer::new();
        assert_eq!(
            ib.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingColumns)
        );

        ib.columns(["id"]);
        let mut buf = Buffer::new();
        assert_eq!(
            ib.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingValues)
        );
    }
}
