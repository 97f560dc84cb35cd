#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::builder::{BuildError, Builder};
    use crate::case_when::case;
    use crate::cond::eq;
    use crate::dialect::Dialect;
    use crate::expr::alias;
    use crate::interpolate::literal;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_when_else_layout() {
        let c = case().when(eq("a", 1), 2).else_(3);
        let mut buf = Buffer::new();
        c.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(buf.sql(), "CASE WHEN (`a` = ?) THEN ? ELSE ? END");
        assert_eq!(
            buf.values(),
            &[
                Value::I64(1).into(),
                Value::I64(2).into(),
                Value::I64(3).into()
            ]
        );
    }

    #[test]
    fn case_interpolates_to_literal() {
        let c = case().when(eq("a", 1), 2).else_(3);
        let sql = literal(Dialect::MySQL, &c).unwrap();
        assert_eq!(sql, "CASE WHEN (`a` = 1) THEN 2 ELSE 3 END");
    }

    #[test]
    fn multiple_whens_keep_order() {
        let c = case().when(eq("a", 1), "one").when(eq("a", 2), "two");
        let mut buf = Buffer::new();
        c.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "CASE WHEN (`a` = ?) THEN ? WHEN (`a` = ?) THEN ? END"
        );
    }

    #[test]
    fn case_without_when_fails() {
        let c = case().else_(0);
        let mut buf = Buffer::new();
        assert_eq!(
            c.render(Dialect::MySQL, &mut buf),
            Err(BuildError::MissingWhen)
        );
    }

    #[test]
    fn aliased_case() {
        let c = alias(case().when(eq("a", 1), 2).else_(3), "flag");
        let mut buf = Buffer::new();
        c.render(Dialect::MySQL, &mut buf).unwrap();
        assert_eq!(
            buf.sql(),
            "CASE WHEN (`a` = ?) THEN ? ELSE ? END AS `flag`"
        );
    }
}
