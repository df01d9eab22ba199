use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use organizee_data::{
    Delete,
    Insert,
    Member,
    MemberFilter,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                email,
                role,
                avatar,
                birth_date,
                password_hash
            FROM users
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id.clone() {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(email) = filter.email.clone() {
            qry.push(" AND email = ").push_bind(email);
        }
        if let Some(role) = filter.role {
            qry.push(" AND role = ").push_bind(role);
        }
        qry.push(" ORDER BY name ");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = String;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<String> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO users (
                    id,
                    name,
                    email,
                    role,
                    avatar,
                    birth_date,
                    password_hash
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.id)
                .push_bind(&member.name)
                .push_bind(&member.email)
                .push_bind(member.role)
                .push_bind(&member.avatar)
                .push_bind(member.birth_date)
                .push_bind(&member.password_hash);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update all member fields
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE users SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", role = ")
                .push_bind(member.role)
                .push(", avatar = ")
                .push_bind(&member.avatar)
                .push(", birth_date = ")
                .push_bind(member.birth_date)
                .push(", password_hash = ")
                .push_bind(&member.password_hash)
                .push(" WHERE id = ")
                .push_bind(&member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member. Payment rows cascade.
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM users WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
