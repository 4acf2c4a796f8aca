// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 职位页面表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Careers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Careers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Careers::Url).string().not_null())
                    .col(ColumnDef::new(Careers::Seen).boolean().not_null().default(false))
                    .col(ColumnDef::new(Careers::Liked).boolean().not_null().default(false))
                    .to_owned(),
            )
            .await?;

        // Lookups by url back the exists / mark_* queries
        manager
            .create_index(
                Index::create()
                    .name("idx_careers_url")
                    .table(Careers::Table)
                    .col(Careers::Url)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Careers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Careers {
    Table,
    Id,
    Url,
    Seen,
    Liked,
}
