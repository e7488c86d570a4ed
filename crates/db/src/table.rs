use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    FamilyId,
    SelectionListId,
    IsConfirmed,
    RecipeIds,
    ShoppingList,
    Version,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ShortList {
    Table,
    Id,
    MealPlanId,
    UserId,
    IsConfirmed,
    RecipeIds,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    Position,
    Id,
    Name,
    Amount,
    Unit,
}
