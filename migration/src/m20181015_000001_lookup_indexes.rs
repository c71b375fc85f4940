use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 同一张照片中同一名警员只能被标注一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_faces_officer_image")
                    .table(Faces::Table)
                    .col(Faces::OfficerId)
                    .col(Faces::ImgId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_officers_department")
                    .table(Officers::Table)
                    .col(Officers::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_officers_last_name")
                    .table(Officers::Table)
                    .col(Officers::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_star_no")
                    .table(Assignments::Table)
                    .col(Assignments::StarNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_images_department_sorting")
                    .table(Images::Table)
                    .col(Images::DepartmentId)
                    .col(Images::ContainsCops)
                    .col(Images::IsTagged)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_images_department_sorting",
            "idx_assignments_star_no",
            "idx_officers_last_name",
            "idx_officers_department",
            "idx_faces_officer_image",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Faces {
    Table,
    OfficerId,
    ImgId,
}

#[derive(DeriveIden)]
enum Officers {
    Table,
    DepartmentId,
    LastName,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    StarNo,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    DepartmentId,
    ContainsCops,
    IsTagged,
}
