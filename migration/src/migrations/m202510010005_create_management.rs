use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_management"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("management"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("management_id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("user_id")).integer().null().unique_key())
                    .col(ColumnDef::new(Alias::new("management_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("email")).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_management_user")
                            .from(Alias::new("management"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("management")).to_owned())
            .await
    }
}
