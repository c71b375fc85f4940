use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Department::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Department::ShortName).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Unit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Unit::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Unit::Descrip).string_len(120).not_null())
                    .col(ColumnDef::new(Unit::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_units_department")
                            .from(Unit::Table, Unit::DepartmentId)
                            .to(Department::Table, Department::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Officer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Officer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Officer::LastName).string_len(120).not_null())
                    .col(ColumnDef::new(Officer::FirstName).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Officer::MiddleInitial)
                            .string_len(120)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Officer::Race).string_len(32).null())
                    .col(ColumnDef::new(Officer::Gender).string_len(16).null())
                    .col(ColumnDef::new(Officer::EmploymentDate).date().null())
                    .col(ColumnDef::new(Officer::BirthYear).integer().null())
                    .col(ColumnDef::new(Officer::DepartmentId).integer().not_null())
                    .col(
                        ColumnDef::new(Officer::UniqueInternalIdentifier)
                            .string_len(50)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_officers_department")
                            .from(Officer::Table, Officer::DepartmentId)
                            .to(Department::Table, Department::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignment::OfficerId).integer().not_null())
                    .col(ColumnDef::new(Assignment::StarNo).string_len(120).null())
                    .col(ColumnDef::new(Assignment::Rank).string_len(120).null())
                    .col(ColumnDef::new(Assignment::UnitId).integer().null())
                    .col(ColumnDef::new(Assignment::StarDate).date().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_officer")
                            .from(Assignment::Table, Assignment::OfficerId)
                            .to(Officer::Table, Officer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string_len(255).not_null())
                    .col(
                        ColumnDef::new(User::Confirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(User::IsAreaCoordinator)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(User::AcDepartmentId).integer().null())
                    .col(
                        ColumnDef::new(User::IsAdministrator)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(User::IsDisabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(User::DeptPref).integer().null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Image::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Image::Filepath).text().not_null())
                    .col(ColumnDef::new(Image::HashImg).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Image::DateImageInserted)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Image::DateImageTaken)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Image::ContainsCops).boolean().null())
                    .col(ColumnDef::new(Image::UserId).integer().null())
                    .col(
                        ColumnDef::new(Image::IsTagged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Image::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_department")
                            .from(Image::Table, Image::DepartmentId)
                            .to(Department::Table, Department::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Face::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Face::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Face::OfficerId).integer().not_null())
                    .col(ColumnDef::new(Face::ImgId).integer().not_null())
                    .col(ColumnDef::new(Face::OriginalImageId).integer().null())
                    .col(ColumnDef::new(Face::FacePositionX).integer().not_null())
                    .col(ColumnDef::new(Face::FacePositionY).integer().not_null())
                    .col(ColumnDef::new(Face::FaceWidth).integer().not_null())
                    .col(ColumnDef::new(Face::FaceHeight).integer().not_null())
                    .col(ColumnDef::new(Face::UserId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faces_officer")
                            .from(Face::Table, Face::OfficerId)
                            .to(Officer::Table, Officer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faces_image")
                            .from(Face::Table, Face::ImgId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Face::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Image::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Officer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Unit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Department {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Name,
    ShortName,
}

#[derive(DeriveIden)]
enum Unit {
    #[sea_orm(iden = "units")]
    Table,
    Id,
    Descrip,
    DepartmentId,
}

#[derive(DeriveIden)]
enum Officer {
    #[sea_orm(iden = "officers")]
    Table,
    Id,
    LastName,
    FirstName,
    MiddleInitial,
    Race,
    Gender,
    EmploymentDate,
    BirthYear,
    DepartmentId,
    UniqueInternalIdentifier,
}

#[derive(DeriveIden)]
enum Assignment {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    OfficerId,
    StarNo,
    Rank,
    UnitId,
    StarDate,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
    Confirmed,
    IsAreaCoordinator,
    AcDepartmentId,
    IsAdministrator,
    IsDisabled,
    DeptPref,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Image {
    #[sea_orm(iden = "images")]
    Table,
    Id,
    Filepath,
    HashImg,
    DateImageInserted,
    DateImageTaken,
    ContainsCops,
    UserId,
    IsTagged,
    DepartmentId,
}

#[derive(DeriveIden)]
enum Face {
    #[sea_orm(iden = "faces")]
    Table,
    Id,
    OfficerId,
    ImgId,
    OriginalImageId,
    FacePositionX,
    FacePositionY,
    FaceWidth,
    FaceHeight,
    UserId,
}
