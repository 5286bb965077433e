// migrations/m202512030001_create_readings.rs
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Readings {
    Table,
    Id,
    Value,
    Timestamp,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202512030001_create_readings"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Readings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Readings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Readings::Value).double().not_null())
                    .col(
                        ColumnDef::new(Readings::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // `latest` and `recent` both order by (timestamp DESC, id DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_readings_timestamp_id")
                    .table(Readings::Table)
                    .col(Readings::Timestamp)
                    .col(Readings::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Readings::Table).to_owned())
            .await
    }
}
