mod changeset_tests;
