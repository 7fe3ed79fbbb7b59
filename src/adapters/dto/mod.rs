mod catalog_rows;
