use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Providers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Providers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Providers::Name).string().not_null())
                    .col(ColumnDef::new(Providers::Service).string().not_null())
                    .col(ColumnDef::new(Providers::Email).string().not_null())
                    .col(ColumnDef::new(Providers::Phone).string().not_null())
                    .col(ColumnDef::new(Providers::Location).string().not_null())
                    .col(ColumnDef::new(Providers::Keywords).text().not_null())
                    .col(
                        ColumnDef::new(Providers::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Providers::Table)
                    .col(Providers::Email)
                    .name("idx_providers_email")
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Providers::Table)
                    .col(Providers::Phone)
                    .name("idx_providers_phone")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Providers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Providers {
    Table,
    Id,
    Name,
    Service,
    Email,
    Phone,
    Location,
    Keywords,
    RegisteredAt,
}
