use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProviderImages::ProviderId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProviderImages::ImageUrl).text().not_null())
                    .col(ColumnDef::new(ProviderImages::PublicId).string().not_null())
                    .col(ColumnDef::new(ProviderImages::Order).integer().not_null())
                    .col(
                        ColumnDef::new(ProviderImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProviderImages::Table, ProviderImages::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        // Not unique: order is assigned best-effort and may have gaps.
        manager
            .create_index(
                Index::create()
                    .table(ProviderImages::Table)
                    .col(ProviderImages::ProviderId)
                    .col(ProviderImages::Order)
                    .name("idx_provider_images_provider_id_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProviderImages {
    Table,
    Id,
    ProviderId,
    ImageUrl,
    PublicId,
    Order,
    CreatedAt,
}

#[derive(Iden)]
enum Providers {
    Table,
    Id,
}
